use std::collections::HashMap;

use compono::prelude::*;
use proptest::prelude::*;
use serde::Deserialize;

const SLOTS: [&str; 6] = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlotConfiguration {
    slot: usize,
    value: String,
}

struct SlotModule {
    name: &'static str,
    value: String,
}

impl Module for SlotModule {
    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        bind::<String>()
            .named(self.name)
            .to_instance(self.value.clone())
            .add_to(services);
        Ok(())
    }
}

impl ConfigurableModule for SlotModule {
    type Configuration = SlotConfiguration;

    fn from_configuration(
        configuration: Self::Configuration,
        _nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError> {
        let name = SLOTS
            .get(configuration.slot)
            .copied()
            .ok_or_else(|| format!("no slot {}", configuration.slot))?;
        Ok(Self {
            name,
            value: configuration.value,
        })
    }
}

fn compose(entries: &[(usize, String)]) -> Result<ComponentBuilder, Error> {
    entries
        .iter()
        .try_fold(ComponentBuilder::new(), |builder, (slot, value)| {
            builder.with_module::<SlotModule>(|c| {
                c.slot = *slot;
                c.value = value.clone();
            })
        })
}

proptest! {
    #[test]
    fn every_registered_service_resolves(
        values in proptest::collection::vec("[a-z]{0,8}", 0..SLOTS.len())
    ) {
        let entries: Vec<(usize, String)> = values.into_iter().enumerate().collect();
        let provider = compose(&entries).build_service_provider().unwrap();

        for (slot, value) in &entries {
            prop_assert_eq!(&provider.get_named::<String>(SLOTS[*slot]).unwrap(), value);
        }
        prop_assert!(provider.try_get::<String>().unwrap().is_none());
        for slot in entries.len()..SLOTS.len() {
            let missing = provider.get_named::<String>(SLOTS[slot]);
            prop_assert!(
                matches!(missing, Err(ResolveError::NotFound { .. })),
                "slot {} should be empty",
                slot
            );
        }
    }

    #[test]
    fn last_registration_wins(
        entries in proptest::collection::vec((0..SLOTS.len(), "[a-z]{1,8}"), 1..16)
    ) {
        let provider = compose(&entries).build_service_provider().unwrap();

        let mut expected: HashMap<usize, Vec<String>> = HashMap::new();
        for (slot, value) in &entries {
            expected.entry(*slot).or_default().push(value.clone());
        }
        for (slot, values) in expected {
            let name = SLOTS[slot];
            prop_assert_eq!(
                provider.get_named::<String>(name).unwrap(),
                values.last().cloned().unwrap()
            );
            prop_assert_eq!(provider.get_all_named::<String>(name).unwrap(), values);
        }
    }
}
