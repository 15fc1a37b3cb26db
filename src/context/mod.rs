//! Export context: drives the tree walker over a set of module parsers.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, error};

use crate::config::ExportOptions;
use crate::environment::ImportEnvironment;
use crate::export::{DumpFlags, DumpScope, ExportCallback, ExportError, Exporter};
use crate::filter::{ModuleParser, ParsedConfig};
use crate::settings::{is_master_service, SettingParserInfo};

/// State of one export request.
///
/// Module parsers are either borrowed from the caller or duplicated from a
/// parsed configuration, in which case the context owns the copy. Keys already
/// emitted are remembered across [`export_parser`](Self::export_parser) calls.
///
/// ```
/// use config_export::{ConfigExport, ConfigKeyType, DumpFlags, DumpScope};
///
/// let mut lines = Vec::new();
/// let mut callback = |key: &str, value: &str, _: ConfigKeyType| lines.push(format!("{key}={value}"));
/// let ctx = ConfigExport::new(DumpScope::Changed, DumpFlags::empty(), &mut callback);
/// let mut section_idx = 0;
/// ctx.export_all_parsers(&mut section_idx)?;
/// assert!(lines.is_empty());
/// # Ok::<(), config_export::ExportError>(())
/// ```
pub struct ConfigExport<'a> {
    exporter: Exporter<'a>,
    module_parsers: Cow<'a, [ModuleParser]>,
}

impl<'a> ConfigExport<'a> {
    pub fn new(scope: DumpScope, flags: DumpFlags, callback: &'a mut dyn ExportCallback) -> Self {
        Self {
            exporter: Exporter::new(scope, flags, callback),
            module_parsers: Cow::Borrowed(&[]),
        }
    }

    pub fn from_options(options: &ExportOptions, callback: &'a mut dyn ExportCallback) -> Self {
        Self::new(options.scope, options.flags(), callback)
    }

    /// Exports `module_parsers` as they are. The caller keeps ownership.
    pub fn set_module_parsers(&mut self, module_parsers: &'a [ModuleParser]) {
        debug!(count = module_parsers.len(), "attached borrowed module parsers");
        self.module_parsers = Cow::Borrowed(module_parsers);
    }

    /// Exports a private copy of the global filter's module parsers.
    ///
    /// Values and change masks are duplicated, schemas are shared. The copy is
    /// released together with the context.
    pub fn dup_module_parsers(&mut self, config: &ParsedConfig) {
        let dup: Vec<ModuleParser> = config
            .global_filter_parser()
            .module_parsers
            .iter()
            .map(ModuleParser::dup)
            .collect();
        debug!(count = dup.len(), "attached duplicated module parsers");
        self.module_parsers = Cow::Owned(dup);
    }

    pub fn parser_count(&self) -> usize {
        self.module_parsers.len()
    }

    pub fn parser_info(&self, parser_idx: usize) -> Option<&Arc<SettingParserInfo>> {
        self.module_parsers.get(parser_idx).map(|module_parser| &module_parser.root)
    }

    /// Exports one module parser.
    ///
    /// `section_idx` is the next free section index on entry and is advanced
    /// past every section handed out. A parser carrying a deferred error
    /// exports nothing and returns that error.
    pub fn export_parser(&mut self, parser_idx: usize, section_idx: &mut u32) -> Result<(), ExportError> {
        let module_parser = self
            .module_parsers
            .get(parser_idx)
            .ok_or(ExportError::NoSuchParser(parser_idx))?;

        if let Some(message) = &module_parser.delayed_error {
            return Err(ExportError::Deferred {
                parser: parser_idx,
                message: message.clone(),
            });
        }

        let mut idx = *section_idx;
        let parser = &module_parser.parser;
        self.exporter
            .export(&module_parser.root, false, parser.set(), parser.changes(), &mut idx);
        debug!(
            parser = %module_parser.root.name,
            first_section = *section_idx,
            next_section = idx,
            "exported module parser"
        );
        *section_idx = idx;
        Ok(())
    }

    /// Exports every module parser in order, stopping at the first failure.
    ///
    /// The context is released either way.
    pub fn export_all_parsers(mut self, section_idx: &mut u32) -> Result<(), ExportError> {
        let result = (0..self.parser_count()).try_for_each(|i| self.export_parser(i, section_idx));
        if let Err(err) = &result {
            error!("{}", err);
        }
        self.free();
        result
    }

    /// The master service's `import_environment` setting.
    ///
    /// # Panics
    ///
    /// Panics if no master service parser is attached.
    pub fn import_environment(&self) -> &str {
        self.master_service_value("import_environment")
    }

    /// The master service's `base_dir` setting.
    ///
    /// # Panics
    ///
    /// Panics if no master service parser is attached.
    pub fn base_dir(&self) -> &str {
        self.master_service_value("base_dir")
    }

    /// Environment for a subordinate process, taken from the process environment.
    pub fn import_environment_vars(&self) -> Vec<(String, String)> {
        ImportEnvironment::parse(self.import_environment()).from_process()
    }

    fn master_service_value(&self, key: &str) -> &str {
        let module_parser = self
            .module_parsers
            .iter()
            .find(|module_parser| is_master_service(&module_parser.root))
            .unwrap_or_else(|| panic!("master service settings missing from module parsers"));
        match module_parser.parser.get_value(key) {
            Some((value, _)) => value
                .as_str()
                .unwrap_or_else(|| panic!("master service setting '{}' is not set", key)),
            None => panic!("master service has no setting '{}'", key),
        }
    }

    /// Releases the context and any duplicated module parsers.
    pub fn free(self) {
        debug!(
            owned = matches!(self.module_parsers, Cow::Owned(_)),
            "released export context"
        );
    }
}
