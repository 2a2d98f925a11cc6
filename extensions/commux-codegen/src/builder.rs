use crate::naming::output_file_name;
use crate::{BuildError, EmitOptions, generate_client};
use commux_schema::SchemaDocument;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Starts configuring client generation for a build script.
///
/// ```rust,no_run
/// // build.rs
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     commux_codegen::configure().compile(&["schema/echo.json"])?;
///     Ok(())
/// }
/// ```
///
/// Each service becomes `$OUT_DIR/<snake_case service name>.rs`, to be pulled
/// into its own module with
/// `include!(concat!(env!("OUT_DIR"), "/echo.rs"));`.
pub fn configure() -> Builder {
    Builder::default()
}

#[derive(Debug, Clone)]
pub struct Builder {
    out_dir: Option<PathBuf>,
    options: EmitOptions,
    emit_rerun_if_changed: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            out_dir: None,
            options: EmitOptions::default(),
            emit_rerun_if_changed: true,
        }
    }
}

/// One generated client, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub service: String,
    pub file_name: String,
    pub contents: String,
}

impl Builder {
    /// Where generated files go. Defaults to `$OUT_DIR`.
    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    /// Path generated code uses to reach the runtime crate (`::commux`
    /// unless the crate is renamed or re-exported).
    pub fn runtime_path(mut self, runtime_path: impl Into<String>) -> Self {
        self.options.runtime_path = runtime_path.into();
        self
    }

    /// Whether to print `cargo:rerun-if-changed` for every schema (on by
    /// default, which is what build scripts want).
    pub fn emit_rerun_if_changed(mut self, enabled: bool) -> Self {
        self.emit_rerun_if_changed = enabled;
        self
    }

    /// Generates every service of every schema, in order, without touching
    /// the file system beyond reading the schemas.
    pub fn generate<P: AsRef<Path>>(&self, schemas: &[P]) -> Result<Vec<GeneratedFile>, BuildError> {
        let mut files = Vec::new();
        let mut file_names = HashSet::new();

        for schema in schemas {
            let path = schema.as_ref();
            if self.emit_rerun_if_changed {
                println!("cargo:rerun-if-changed={}", path.display());
            }

            let schema_error = |source| BuildError::Schema {
                path: path.to_path_buf(),
                source,
            };

            let services = SchemaDocument::from_path(path)
                .and_then(|document| document.services())
                .map_err(schema_error)?;

            for service in &services {
                let contents = generate_client(service, &self.options).map_err(schema_error)?;
                let file_name = output_file_name(&service.name);

                if !file_names.insert(file_name.clone()) {
                    return Err(BuildError::DuplicateOutput { file_name });
                }

                tracing::debug!(
                    "generated {} ({} bytes) from {}",
                    file_name,
                    contents.len(),
                    path.display()
                );
                files.push(GeneratedFile {
                    service: service.name.clone(),
                    file_name,
                    contents,
                });
            }
        }

        Ok(files)
    }

    /// Generates and writes every client, returning the written paths.
    ///
    /// Files whose contents are unchanged are left alone so their mtime does
    /// not trigger needless rebuilds.
    pub fn compile<P: AsRef<Path>>(&self, schemas: &[P]) -> Result<Vec<PathBuf>, BuildError> {
        let out_dir = self.resolve_out_dir()?;
        std::fs::create_dir_all(&out_dir).map_err(|source| BuildError::Io {
            path: out_dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        for file in self.generate(schemas)? {
            let path = out_dir.join(&file.file_name);

            if read_existing(&path)?.as_deref() != Some(file.contents.as_str()) {
                std::fs::write(&path, &file.contents).map_err(|source| BuildError::Io {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!("wrote {} for service {}", path.display(), file.service);
            }

            written.push(path);
        }

        Ok(written)
    }

    /// Fails with [`BuildError::Stale`] if any generated file on disk differs
    /// from what the schemas currently produce.
    pub fn check<P: AsRef<Path>>(&self, schemas: &[P]) -> Result<(), BuildError> {
        let out_dir = self.resolve_out_dir()?;

        for file in self.generate(schemas)? {
            let path = out_dir.join(&file.file_name);
            if read_existing(&path)?.as_deref() != Some(file.contents.as_str()) {
                return Err(BuildError::Stale { path });
            }
        }

        Ok(())
    }

    fn resolve_out_dir(&self) -> Result<PathBuf, BuildError> {
        match &self.out_dir {
            Some(out_dir) => Ok(out_dir.clone()),
            None => std::env::var_os("OUT_DIR")
                .map(PathBuf::from)
                .ok_or(BuildError::MissingOutDir),
        }
    }
}

fn read_existing(path: &Path) -> Result<Option<String>, BuildError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BuildError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
