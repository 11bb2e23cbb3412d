use core::convert::Infallible;

/// Unwrap results that cannot fail, without a panic path.
pub trait OptionalExt {
    type Value;

    fn unwrap_infallible(self) -> Self::Value;
}

impl<T> OptionalExt for Result<T, Infallible> {
    type Value = T;

    #[inline(always)]
    fn unwrap_infallible(self) -> Self::Value {
        match self {
            Ok(x) => x,
            Err(never) => match never {},
        }
    }
}
