//! Test framework protocol
//!
//! Name-based knowledge about the unit-test framework the module was built
//! against: which functions are test bodies, which calls are assertions.

pub trait TestFramework: Send + Sync {
    fn is_test_function(&self, name: &str) -> bool;

    fn is_assertion_function(&self, name: &str) -> bool;

    /// Functions never analyzed nor reported
    fn is_excluded_function(&self, _name: &str) -> bool {
        false
    }

    /// Argument types of assertion calls that are not traced
    fn is_assertion_type(&self, _ty: &str) -> bool {
        false
    }
}
