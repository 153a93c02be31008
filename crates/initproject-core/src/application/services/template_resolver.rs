//! Template lookup: override file first, then the project type's fallback.

use std::{path::PathBuf, sync::Arc};

use tracing::debug;

use crate::{
    TEMPLATE_EXTENSION,
    application::{
        GenerationError,
        plugin::ProjectType,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::Configuration,
};

/// Finds template sources and renders them against a configuration.
///
/// An override named `<name>.tmpl` in the override directory always wins
/// over the built-in template of the same name. Whichever source is found
/// is rendered; there is no path that returns a raw template.
pub struct TemplateResolver {
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
    override_dir: PathBuf,
}

impl TemplateResolver {
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        filesystem: Arc<dyn Filesystem>,
        override_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            override_dir: override_dir.into(),
        }
    }

    /// Where an override for `name` would live.
    pub fn override_path(&self, name: &str) -> PathBuf {
        self.override_dir
            .join(format!("{name}.{TEMPLATE_EXTENSION}"))
    }

    /// Resolve `name` for `project_type` and render it.
    pub fn resolve(
        &self,
        project_type: &dyn ProjectType,
        name: &str,
        config: &Configuration,
    ) -> Result<String, GenerationError> {
        let override_path = self.override_path(name);

        let source = if self.filesystem.is_file(&override_path) {
            debug!(template = name, path = %override_path.display(), "using override template");
            self.filesystem.read_to_string(&override_path)?
        } else if let Some(source) = project_type.fallback_template(name) {
            debug!(template = name, "using built-in template");
            source.to_owned()
        } else {
            return Err(GenerationError::TemplateNotFound { name: name.into() });
        };

        self.render(name, &source, config)
    }

    /// Render an arbitrary source string.
    pub fn render(
        &self,
        name: &str,
        source: &str,
        config: &Configuration,
    ) -> Result<String, GenerationError> {
        Ok(self.renderer.render(name, source, config)?)
    }
}

impl std::fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateResolver")
            .field("override_dir", &self.override_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        FilesystemError, GenerationContext, RenderError,
        plugin::FallbackTemplate,
        ports::{MockFilesystem, MockTemplateRenderer},
    };
    use mockall::predicate::function;
    use std::path::Path;

    struct Readme;

    fn readme_md() -> &'static str {
        "built-in {{ name }}"
    }

    impl ProjectType for Readme {
        fn name(&self) -> &str {
            "readme"
        }

        fn describe_short(&self) -> &str {
            "writes a readme"
        }

        fn validate_environment(&self, _ctx: &GenerationContext<'_>) -> Vec<String> {
            Vec::new()
        }

        fn refresh(&self, _ctx: &GenerationContext<'_>) -> Result<(), GenerationError> {
            Ok(())
        }

        fn fallback_templates(&self) -> &[FallbackTemplate] {
            const TEMPLATES: &[FallbackTemplate] =
                &[FallbackTemplate::new("README_md", readme_md)];
            TEMPLATES
        }
    }

    fn echo_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|_, source, _| Ok(format!("<{source}>")));
        renderer
    }

    fn config() -> Configuration {
        Configuration::from_yaml_str("name: Foo\n").unwrap()
    }

    #[test]
    fn override_file_wins_over_fallback() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file()
            .with(function(|p: &Path| p == Path::new("tmpl/README_md.tmpl")))
            .return_const(true);
        fs.expect_read_to_string()
            .with(function(|p: &Path| p == Path::new("tmpl/README_md.tmpl")))
            .returning(|_| Ok("override".into()));

        let resolver = TemplateResolver::new(Arc::new(echo_renderer()), Arc::new(fs), "tmpl");
        let out = resolver.resolve(&Readme, "README_md", &config()).unwrap();

        assert_eq!(out, "<override>");
    }

    #[test]
    fn falls_back_to_built_in_template() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);

        let resolver = TemplateResolver::new(Arc::new(echo_renderer()), Arc::new(fs), ".");
        let out = resolver.resolve(&Readme, "README_md", &config()).unwrap();

        assert_eq!(out, "<built-in {{ name }}>");
    }

    #[test]
    fn unknown_template_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);

        let resolver =
            TemplateResolver::new(Arc::new(MockTemplateRenderer::new()), Arc::new(fs), ".");
        let err = resolver.resolve(&Readme, "LICENSE", &config()).unwrap_err();

        assert_eq!(
            err,
            GenerationError::TemplateNotFound {
                name: "LICENSE".into()
            }
        );
    }

    #[test]
    fn unreadable_override_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string().returning(|path| {
            Err(FilesystemError {
                path: path.to_path_buf(),
                operation: "read",
                reason: "permission denied".into(),
            })
        });

        let resolver =
            TemplateResolver::new(Arc::new(MockTemplateRenderer::new()), Arc::new(fs), ".");
        let err = resolver.resolve(&Readme, "README_md", &config()).unwrap_err();

        assert!(matches!(err, GenerationError::Filesystem(_)));
    }

    #[test]
    fn render_failures_carry_the_template_name() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|name, _, _| {
            Err(RenderError {
                template: name.into(),
                reason: "unexpected end of tag".into(),
            })
        });

        let resolver = TemplateResolver::new(
            Arc::new(renderer),
            Arc::new(MockFilesystem::new()),
            ".",
        );
        let err = resolver.render("inline", "{{", &config()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to render template 'inline': unexpected end of tag"
        );
    }
}
