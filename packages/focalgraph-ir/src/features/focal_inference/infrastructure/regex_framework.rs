//! Pattern-driven [`TestFramework`]

use regex::Regex;

use crate::config::validation::{compile_optional_pattern, compile_pattern};
use crate::config::{AnalysisConfig, ConfigResult};
use crate::features::focal_inference::ports::TestFramework;

#[derive(Debug, Clone)]
pub struct RegexTestFramework {
    test: Regex,
    assertion: Regex,
    exclusion: Option<Regex>,
    assertion_type: Option<Regex>,
}

impl RegexTestFramework {
    pub fn from_config(config: &AnalysisConfig) -> ConfigResult<Self> {
        Ok(Self {
            test: compile_pattern("test_function_pattern", &config.test_function_pattern)?,
            assertion: compile_pattern(
                "assertion_function_pattern",
                &config.assertion_function_pattern,
            )?,
            exclusion: compile_optional_pattern(
                "exclusion_function_pattern",
                config.exclusion_function_pattern.as_deref(),
            )?,
            assertion_type: compile_optional_pattern(
                "assertion_type_pattern",
                config.assertion_type_pattern.as_deref(),
            )?,
        })
    }
}

impl TestFramework for RegexTestFramework {
    fn is_test_function(&self, name: &str) -> bool {
        self.test.is_match(name)
    }

    fn is_assertion_function(&self, name: &str) -> bool {
        self.assertion.is_match(name)
    }

    fn is_excluded_function(&self, name: &str) -> bool {
        self.exclusion.as_ref().is_some_and(|re| re.is_match(name))
    }

    fn is_assertion_type(&self, ty: &str) -> bool {
        self.assertion_type.as_ref().is_some_and(|re| re.is_match(ty))
    }
}
