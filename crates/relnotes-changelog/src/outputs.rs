//! Writing one report to several files at once
//!
//! Every line goes to the aggregate output; lines that belong to a known
//! project also go to that project's own output.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ChangelogError, Result};

/// Template parameters, substituted as `{name}`
pub type Params = BTreeMap<String, String>;

/// Replace every `{name}` in `template` with its value from `params`.
/// Unknown placeholders are left untouched.
pub fn render_template(template: &str, params: &Params) -> String {
    params.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

struct Stream {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Stream {
    fn open(path: PathBuf) -> Result<Self> {
        let file = File::create(&path).map_err(|source| ChangelogError::CreateFailed {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened output file");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }
}

/// An aggregate output plus one output per project key
pub struct Outputs {
    params: Params,
    base: Stream,
    others: Vec<(String, Stream)>,
}

impl Outputs {
    /// Open the aggregate file and one file per key inside `dir`.
    ///
    /// File names come from the templates with `params` (and, for project
    /// files, `{key}`) substituted.
    pub fn create(
        dir: &Path,
        base_template: &str,
        key_template: &str,
        keys: &[String],
        params: Params,
    ) -> Result<Self> {
        let base = Stream::open(dir.join(render_template(base_template, &params)))?;

        let mut others = Vec::with_capacity(keys.len());
        for key in keys {
            let path = dir.join(render_template(key_template, &Self::with_key(&params, key)));
            others.push((key.clone(), Stream::open(path)?));
        }

        info!(dir = %dir.display(), file_count = others.len() + 1, "output files opened");
        Ok(Self {
            params,
            base,
            others,
        })
    }

    fn with_key(params: &Params, key: &str) -> Params {
        let mut both = params.clone();
        both.insert("key".to_string(), key.to_string());
        both
    }

    /// Project keys with their own output, in configured order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.others.iter().map(|(key, _)| key.as_str())
    }

    /// Whether `key` has its own output
    pub fn has_key(&self, key: &str) -> bool {
        self.others.iter().any(|(k, _)| k == key)
    }

    /// Render `template` for every output and write it. The aggregate sees
    /// an empty `{key}`, each project output its own key.
    pub fn write_all(&mut self, template: &str) -> Result<()> {
        let base_text = render_template(template, &Self::with_key(&self.params, ""));
        self.base.writer.write_all(base_text.as_bytes())?;

        for (key, stream) in &mut self.others {
            let text = render_template(template, &Self::with_key(&self.params, key));
            stream.writer.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    /// Write `text` to the aggregate, and to `key`'s output when it has one
    pub fn write_key_raw(&mut self, key: &str, text: &str) -> Result<()> {
        self.base.writer.write_all(text.as_bytes())?;
        if let Some((_, stream)) = self.others.iter_mut().find(|(k, _)| k == key) {
            stream.writer.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    /// Flush every output, returning the paths of the files written
    pub fn close(self) -> Result<Vec<PathBuf>> {
        let streams = std::iter::once(self.base).chain(self.others.into_iter().map(|(_, s)| s));

        let mut paths = Vec::new();
        for mut stream in streams {
            stream.writer.flush()?;
            paths.push(stream.path);
        }

        debug!(file_count = paths.len(), "output files closed");
        Ok(paths)
    }
}
