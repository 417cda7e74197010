use fswire::config::{ConfigFile, DecodeSection, OutputSection, RawConfigFile};
use fswire::types::Separator;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                output: OutputSection::default(),
                decode: DecodeSection::default(),
            },
        }
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.config.output.separator = separator;
        self
    }

    pub fn with_max_unit_len(mut self, max: usize) -> Self {
        self.config.decode.max_unit_len = max;
        self
    }

    /// The unvalidated config, for exercising validation failures.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build `id<TAB>flags<TAB>path` input for the tuple source.
#[derive(Default)]
pub struct TupleInputBuilder {
    text: String,
}

impl TupleInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, id: u64, flags: &str, path: &str) -> Self {
        self.text.push_str(&format!("{id}\t{flags}\t{path}\n"));
        self
    }

    /// Any line, verbatim (comments, blanks, garbage).
    pub fn line(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}
