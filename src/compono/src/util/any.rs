use std::any::{self, Any};

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

pub trait Downcast: Sized {
    type Output<T>;

    fn is<T: Any>(&self) -> bool;

    fn downcast<T: Any>(self) -> Result<Self::Output<T>, Self>;
}

impl<S> Downcast for Box<S>
where
    S: AsAny + ?Sized,
{
    type Output<T> = Box<T>;

    #[inline]
    fn is<T: Any>(&self) -> bool {
        (**self).as_any().is::<T>()
    }

    fn downcast<T: Any>(self) -> Result<Self::Output<T>, Self> {
        if self.is::<T>() {
            let res = self
                .into_any()
                .downcast::<T>()
                .unwrap_or_else(|_| std::unreachable!("`self` should be `Box<T>`"));
            Ok(res)
        } else {
            Err(self)
        }
    }
}
