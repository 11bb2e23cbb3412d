use std::fmt::{self, Debug, Display};

/// Makes `main` print the `Display` form of an error, instead of the `Debug` form.
pub struct DebugFromDisplay<T>(T);

impl<T> From<T> for DebugFromDisplay<T> {
    fn from(x: T) -> Self {
        Self(x)
    }
}

impl<T: Display> Debug for DebugFromDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
