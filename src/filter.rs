//! Parsed configuration as handed over by the config parser.

use std::sync::Arc;

use crate::settings::{SettingParser, SettingParserInfo};

/// One schema root with its parsed values.
///
/// `delayed_error` holds a failure recorded while the parser was built. It is
/// only reported once the parser is exported.
#[derive(Debug, Clone)]
pub struct ModuleParser {
    pub root: Arc<SettingParserInfo>,
    pub parser: SettingParser,
    pub delayed_error: Option<String>,
}

impl ModuleParser {
    pub fn new(parser: SettingParser) -> Self {
        Self {
            root: Arc::clone(parser.root()),
            parser,
            delayed_error: None,
        }
    }

    pub fn with_error(parser: SettingParser, error: impl Into<String>) -> Self {
        Self {
            delayed_error: Some(error.into()),
            ..Self::new(parser)
        }
    }

    /// Copy with independently duplicated values. The schema is shared.
    pub fn dup(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            parser: self.parser.dup(),
            delayed_error: self.delayed_error.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterParser {
    pub module_parsers: Vec<ModuleParser>,
}

/// Result of parsing a full configuration.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    global_filter: FilterParser,
}

impl ParsedConfig {
    pub fn new(module_parsers: Vec<ModuleParser>) -> Self {
        Self {
            global_filter: FilterParser { module_parsers },
        }
    }

    /// Parsers of the unfiltered, global configuration.
    pub fn global_filter_parser(&self) -> &FilterParser {
        &self.global_filter
    }

    pub fn global_filter_parser_mut(&mut self) -> &mut FilterParser {
        &mut self.global_filter
    }
}
