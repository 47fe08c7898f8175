mod test_framework;

pub use test_framework::TestFramework;
