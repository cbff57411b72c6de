#[cfg(feature = "serde")]
use serde::Serialize;

use strum_macros::IntoStaticStr;

/// `mathvariant` attribute of an `<mstyle>` wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MathVariant {
    #[strum(serialize = r#" mathvariant="script""#)]
    Script,
}
