use std::collections::HashMap;
use std::slice;

use crate::container::collection::ServiceDescriptor;
use crate::key::ServiceKey;

/// Registrations indexed by key, in the order they were added.
#[derive(Debug)]
pub struct DescriptorMap {
    descriptors: Vec<ServiceDescriptor>,
    slots: HashMap<ServiceKey, DescriptorSlot>,
}

impl DescriptorMap {
    pub fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        let mut slots: HashMap<ServiceKey, DescriptorSlot> = HashMap::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            if let Some(slot) = slots.get_mut(descriptor.key()) {
                slot.push(index);
            } else {
                slots.insert(*descriptor.key(), index.into());
            }
        }
        Self { descriptors, slots }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the registration of `key` added last, with its index.
    pub fn last(&self, key: &ServiceKey) -> Option<(usize, &ServiceDescriptor)> {
        self.slots
            .get(key)
            .map(DescriptorSlot::last)
            .map(|index| (index, &self.descriptors[index]))
    }

    /// Returns every registration of `key` in registration order.
    pub fn all(&self, key: &ServiceKey) -> Vec<(usize, &ServiceDescriptor)> {
        self.slots
            .get(key)
            .map(DescriptorSlot::indices)
            .unwrap_or_default()
            .iter()
            .map(|&index| (index, &self.descriptors[index]))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ServiceDescriptor)> {
        self.descriptors.iter().enumerate()
    }
}

#[derive(Debug)]
enum DescriptorSlot {
    Single(usize),
    Many(Vec<usize>),
}

impl DescriptorSlot {
    fn push(&mut self, index: usize) {
        match self {
            Self::Single(first) => {
                let first = *first;
                *self = Self::Many(vec![first, index]);
            }
            Self::Many(indices) => indices.push(index),
        }
    }

    fn last(&self) -> usize {
        match self {
            Self::Single(index) => *index,
            Self::Many(indices) => match indices.last() {
                Some(index) => *index,
                None => unreachable!("`Self::Many` should hold at least two indices"),
            },
        }
    }

    fn indices(&self) -> &[usize] {
        match self {
            Self::Single(index) => slice::from_ref(index),
            Self::Many(indices) => indices,
        }
    }
}

impl From<usize> for DescriptorSlot {
    fn from(index: usize) -> Self {
        Self::Single(index)
    }
}
