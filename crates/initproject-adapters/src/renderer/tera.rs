//! Tera-backed rendering engine.

use std::error::Error as _;

use initproject_core::{
    application::{RenderError, ports::TemplateRenderer},
    domain::Configuration,
};
use serde_json::Value;
use tera::{Context, Tera};
use tracing::{debug, instrument};

use super::compat::{self, RootUse};

/// Renders templates with Tera, with Jinja-style block trimming and
/// missing variables rendered as empty.
///
/// A fresh `Tera` instance is built for every render; nothing is cached
/// between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Bind every root the template reads but the configuration lacks.
    fn build_context(
        name: &str,
        config: &Configuration,
        roots: impl IntoIterator<Item = (String, RootUse)>,
    ) -> Result<Context, RenderError> {
        let mut context =
            Context::from_value(config.as_value().clone()).map_err(|e| render_error(name, &e))?;

        for (root, usage) in roots {
            if context.contains_key(&root) {
                continue;
            }
            debug!(template = name, variable = %root, "binding undefined variable as empty");
            match usage {
                RootUse::Scalar => context.insert(root, ""),
                RootUse::Iterable => context.insert(root, &Vec::<Value>::new()),
            }
        }
        Ok(context)
    }
}

impl TemplateRenderer for TeraRenderer {
    #[instrument(skip(self, source, config))]
    fn render(
        &self,
        name: &str,
        source: &str,
        config: &Configuration,
    ) -> Result<String, RenderError> {
        let prepared = compat::prepare(source);
        let context = Self::build_context(name, config, prepared.roots)?;

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());

        tera.render_str(&prepared.source, &context)
            .map_err(|e| render_error(name, &e))
    }
}

/// Flatten Tera's error chain into one line, dropping its internal
/// one-off template name.
fn render_error(name: &str, error: &tera::Error) -> RenderError {
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    let reason = messages
        .into_iter()
        .map(|msg| {
            msg.replace("while rendering '__tera_one_off'", "")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string()
        })
        .filter(|msg| !msg.is_empty())
        .collect::<Vec<_>>()
        .join(": ");

    RenderError {
        template: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, yaml: &str) -> String {
        let config = Configuration::from_yaml_str(yaml).unwrap();
        TeraRenderer::new().render("test", source, &config).unwrap()
    }

    #[test]
    fn substitutes_nested_values() {
        assert_eq!(
            render("{{ name }} uses {{ supported_paths.build }}", "name: Foo\nsupported_paths:\n  build: premake\n"),
            "Foo uses premake"
        );
    }

    #[test]
    fn missing_variables_render_empty() {
        assert_eq!(render("[{{ author_twitter }}]", "name: Foo\n"), "[]");
        assert_eq!(render("[{{ share.license }}]", "name: Foo\n"), "[]");
        assert_eq!(render("[{{ name.first }}]", "name: Foo\n"), "[]");
    }

    #[test]
    fn missing_values_are_falsy_and_comparable() {
        let source = "{% if share.enable %}shared{% endif %}\
                      {% if project_type == \"lib\" %}lib{% else %}app{% endif %}";
        assert_eq!(render(source, "name: Foo\n"), "app");
    }

    #[test]
    fn loops_over_missing_sequences_render_nothing() {
        let source = "start\n{% for etype in execution_types %}\n{{ etype }}\n{% endfor %}\nend\n";
        assert_eq!(render(source, "name: Foo\n"), "start\nend\n");
    }

    #[test]
    fn missing_nested_keys_compare_unequal() {
        let yaml = "name: Foo\nshare:\n  enable: true\n";
        let source = "{% if share.license == \"mit\" %}mit{% else %}other{% endif %}";
        assert_eq!(render(source, yaml), "other");
        assert_eq!(render("{% if share.license %}x{% endif %}-", yaml), "-");
    }

    #[test]
    fn missing_nested_sequences_iterate_nothing() {
        let yaml = "name: Foo\nshare:\n  enable: true\n";
        let source = "[{% for x in share.extra %}{{ x }}{% endfor %}]";
        assert_eq!(render(source, yaml), "[]");
        assert_eq!(render(source, "name: Foo\n"), "[]");
    }

    #[test]
    fn present_nested_values_are_not_masked() {
        let yaml = "share:\n  enable: false\n  license: mit\n  extra: [a, b]\n";
        let source = "{% if share.license == \"mit\" %}mit{% endif %}\
                      {% if share.enable %}!{% endif %}\
                      {% for x in share.extra %}{{ x }}{% endfor %}";
        assert_eq!(render(source, yaml), "mitab");
    }

    #[test]
    fn block_tags_leave_no_blank_lines() {
        let source = "{% for etype in execution_types %}\n#if defined({{ etype|upper }})\n{% endfor %}\n";
        assert_eq!(
            render(source, "execution_types: [debug, release]\n"),
            "#if defined(DEBUG)\n#if defined(RELEASE)\n"
        );
    }

    #[test]
    fn title_filter_capitalises_words() {
        assert_eq!(render("{{ kind|title }}", "kind: release build\n"), "Release Build");
    }

    #[test]
    fn elif_chains_are_supported() {
        let source = "{% if a %}a{% elif b %}b{% else %}c{% endif %}";
        assert_eq!(render(source, "b: true\n"), "b");
    }

    #[test]
    fn output_is_not_html_escaped() {
        assert_eq!(render("{{ email }}", "email: \"<a@b.c>\"\n"), "<a@b.c>");
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = Configuration::from_yaml_str("name: Foo\nb: 2\na: 1\n").unwrap();
        let renderer = TeraRenderer::new();
        let first = renderer.render("t", "{{ name }} {{ a }}{{ b }}", &config).unwrap();
        let second = renderer.render("t", "{{ name }} {{ a }}{{ b }}", &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn syntax_errors_name_the_template() {
        let config = Configuration::from_yaml_str("name: Foo\n").unwrap();
        let err = TeraRenderer::new()
            .render("README_md", "{% if name %}unterminated", &config)
            .unwrap_err();
        assert_eq!(err.template, "README_md");
        assert!(!err.reason.contains("__tera_one_off"));
    }
}
