//! Test utilities shared between the crates of the workspace.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// A result type useful in tests, that wraps any error implementation.
pub type Result<T = ()> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Macro for creating parametrized tests.
///
/// The `param_test!` macro accepts the name of an existing function, followed by a list of case
/// names and their arguments. It expands to a module with a `#[test]` function for each of the
/// cases. Each test case calls the existing, named function with their provided arguments.
///
/// # Examples
///
/// ```
/// # use test_utils::param_test;
/// #
/// param_test! {
///     renders_port: [
///         http: (80, "80"),
///         max: (u16::MAX, "65535")
///     ]
/// }
/// fn renders_port(port: u16, expected: &str) {
///     assert_eq!(port.to_string(), expected);
/// }
/// ```
///
/// Test functions can also return a [`Result`], and attributes such as `#[ignore]` may be added
/// to individual cases:
///
/// ```
/// # use test_utils::param_test;
/// #
/// param_test! {
///     parses_port -> test_utils::Result: [
///         #[ignore] http: ("80", 80),
///         https: ("443", 443)
///     ]
/// }
/// fn parses_port(to_parse: &str, expected: u16) -> test_utils::Result {
///     assert_eq!(expected, to_parse.parse::<u16>()?);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! param_test {
    ($func_name:ident -> $return_ty:ty: [
        $( $(#[$outer:meta])* $case_name:ident: ( $($args:expr),+ )  ),+$(,)?
    ]) => {
        mod $func_name {
            use super::*;

            $(
                #[test]
                $(#[$outer])*
                fn $case_name() -> $return_ty {
                    $func_name($($args),+)
                }
            )*
        }
    };
    ($func_name:ident: [
        $( $(#[$outer:meta])* $case_name:ident: ( $($args:expr),+ ) ),+$(,)?
    ]) => {
        param_test!($func_name -> (): [ $( $(#[$outer])* $case_name: ( $($args),+ ) ),+ ]);
    };
}

/// A cloneable counter of calls, for instrumenting callbacks such as renderers.
///
/// All clones share the same count, so one clone can be moved into a callback while the test
/// keeps another to observe how often the callback ran.
///
/// ```
/// # use test_utils::CallCounter;
/// let counter = CallCounter::new();
/// let calls = counter.clone();
/// let callback = move || calls.increment();
///
/// callback();
/// callback();
/// assert_eq!(counter.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one call.
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the number of calls recorded by this counter and all of its clones.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
