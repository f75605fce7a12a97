use core::panic::Location;

use thiserror::Error;

use crate::key::EnumKey;

/// Failures an [`EnumMap`](crate::EnumMap) can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumMapError {
    /// A lookup required a key that has no entry.
    #[error("no entry for key with ordinal {ordinal} (map holds {size} entries)")]
    OutOfRange {
        /// Ordinal of the missing key.
        ordinal: usize,
        /// Number of entries in the map at the time of the lookup.
        size: usize,
    },

    /// A constructor expecting each key once saw a key twice.
    #[error("duplicate enum entries")]
    DuplicateEnumEntries,

    /// A constructor expecting every key saw fewer than all of them.
    #[error("missing enum entries")]
    MissingEnumEntries,
}

/// Decides what happens when an [`EnumMap`](crate::EnumMap) operation fails.
///
/// Every hook diverges. Pick the behavior per map type through the `C`
/// parameter of [`EnumMap`](crate::EnumMap), e.g. [`AbortChecking`] (the
/// default) or [`PanicChecking`].
///
/// # Examples
/// ```
/// use core::panic::Location;
/// use enum_map_fixed::{EnumKey, EnumMap, EnumMapChecking};
///
/// struct HaltChecking;
///
/// impl EnumMapChecking for HaltChecking {
///     fn out_of_range<K: EnumKey>(key: K, _: usize, _: &'static Location<'static>) -> ! {
///         panic!("halt: key {}", key.ordinal())
///     }
///     fn duplicate_enum_entries(_: &'static Location<'static>) -> ! {
///         panic!("halt: duplicate")
///     }
///     fn missing_enum_entries(_: &'static Location<'static>) -> ! {
///         panic!("halt: missing")
///     }
/// }
///
/// let map: EnumMap<bool, u8, HaltChecking> = EnumMap::new();
/// assert!(map.is_empty());
/// ```
pub trait EnumMapChecking {
    /// Called by `at` when `key` has no entry; `size` is the map's length.
    fn out_of_range<K: EnumKey>(key: K, size: usize, location: &'static Location<'static>) -> !;

    /// Called when a constructor expecting each key once sees a repeat.
    fn duplicate_enum_entries(location: &'static Location<'static>) -> !;

    /// Called when a constructor expecting every key sees fewer.
    fn missing_enum_entries(location: &'static Location<'static>) -> !;
}

/// Logs the failure (with the `log` feature) and aborts the process.
///
/// Without the `std` feature there is no process to abort, so this panics
/// and leaves the outcome to the panic handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbortChecking;

impl AbortChecking {
    #[cold]
    fn fail(error: EnumMapError, location: &'static Location<'static>) -> ! {
        #[cfg(feature = "log")]
        log::error!("enum map check failed at {location}: {error}");

        terminate(error, location)
    }
}

#[cfg(feature = "std")]
fn terminate(_error: EnumMapError, _location: &'static Location<'static>) -> ! {
    std::process::abort()
}

#[cfg(not(feature = "std"))]
fn terminate(error: EnumMapError, location: &'static Location<'static>) -> ! {
    panic!("{error} at {location}")
}

impl EnumMapChecking for AbortChecking {
    fn out_of_range<K: EnumKey>(key: K, size: usize, location: &'static Location<'static>) -> ! {
        Self::fail(
            EnumMapError::OutOfRange {
                ordinal: key.ordinal(),
                size,
            },
            location,
        )
    }

    fn duplicate_enum_entries(location: &'static Location<'static>) -> ! {
        Self::fail(EnumMapError::DuplicateEnumEntries, location)
    }

    fn missing_enum_entries(location: &'static Location<'static>) -> ! {
        Self::fail(EnumMapError::MissingEnumEntries, location)
    }
}

/// Panics with the failure and the caller's location.
///
/// Lets failures unwind, so they can be caught or asserted on with
/// `#[should_panic]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanicChecking;

impl PanicChecking {
    #[cold]
    fn fail(error: EnumMapError, location: &'static Location<'static>) -> ! {
        #[cfg(feature = "log")]
        log::debug!("enum map check failed at {location}: {error}");

        panic!("{error} at {location}")
    }
}

impl EnumMapChecking for PanicChecking {
    fn out_of_range<K: EnumKey>(key: K, size: usize, location: &'static Location<'static>) -> ! {
        Self::fail(
            EnumMapError::OutOfRange {
                ordinal: key.ordinal(),
                size,
            },
            location,
        )
    }

    fn duplicate_enum_entries(location: &'static Location<'static>) -> ! {
        Self::fail(EnumMapError::DuplicateEnumEntries, location)
    }

    fn missing_enum_entries(location: &'static Location<'static>) -> ! {
        Self::fail(EnumMapError::MissingEnumEntries, location)
    }
}
