/// Internal helper to emit `serde` impls when the `serde` feature is enabled.
#[doc(hidden)]
#[cfg(feature = "serde")]
#[macro_export]
macro_rules! cfg_serde {
    ($($item:item)*) => { $($item)* };
}

#[doc(hidden)]
#[cfg(not(feature = "serde"))]
#[macro_export]
macro_rules! cfg_serde {
    ($($item:item)*) => {};
}

#[doc(hidden)]
#[cfg(feature = "serde")]
pub use serde as __serde;
