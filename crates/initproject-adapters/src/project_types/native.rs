//! The `native` project type: a C/C++ repository following the Frogtoss
//! Native Project Standards.
//!
//! Configuration keys read (all optional, missing means disabled):
//!
//! | Key | Effect |
//! |-----|--------|
//! | `supported_paths.src.enable` | `src/` |
//! | `supported_paths.src.shaders` | `src/shaders/` |
//! | `supported_paths.src.config` | `src/config/` and `src/config/<prefix>config.h` |
//! | `supported_paths.public_include` | `include/` |
//! | `supported_paths.build` | `build/`, and premake5 must be on PATH |
//! | `supported_paths.vendors` | `vendors/`, `vendors/include/`, `vendors/lib/` |
//! | `supported_paths.test` | `test/` |
//! | `share.enable`, `share.license` | `LICENSE` |
//! | `license` | `LICENSE` when there is no `share` section |
//!
//! `README.md` is always written.

use std::path::PathBuf;

use initproject_core::{
    application::{FallbackTemplate, GenerationContext, GenerationError, ProjectType},
    domain::Configuration,
};
use serde_json::Value;
use tracing::{debug, info};

use super::licenses::{license, license_keys};

pub const NAME: &str = "native";

const PREMAKE: &str = "premake5";

const TEMPLATES: &[FallbackTemplate] = &[
    FallbackTemplate::new("README_md", readme_md),
    FallbackTemplate::new("config_h", config_h),
];

/// Frogtoss Native Project Standards generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProject;

impl NativeProject {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectType for NativeProject {
    fn name(&self) -> &str {
        NAME
    }

    fn describe_short(&self) -> &str {
        "Frogtoss Native Project Standards-compliant project"
    }

    fn validate_environment(&self, ctx: &GenerationContext<'_>) -> Vec<String> {
        if ctx.config().flag("supported_paths.build") {
            ctx.missing_programs(&[PREMAKE])
        } else {
            Vec::new()
        }
    }

    fn refresh(&self, ctx: &GenerationContext<'_>) -> Result<(), GenerationError> {
        let config = ctx.config();

        // Fail on a bad license or prefix before touching the output path.
        let license = selected_license(config)?;
        let config_header = config_header_path(config)?;

        for dir in directories(config) {
            ctx.create_dir(dir)?;
        }

        ctx.write("README.md", &ctx.load_template("README_md")?)?;

        if let Some((key, text)) = license {
            info!(license = key, "writing LICENSE");
            ctx.write("LICENSE", &ctx.render_str("LICENSE", text)?)?;
        }

        if let Some(path) = config_header {
            ctx.write(path, &ctx.load_template("config_h")?)?;
        }

        Ok(())
    }

    fn fallback_templates(&self) -> &[FallbackTemplate] {
        TEMPLATES
    }
}

/// Directories to create, parents first.
pub fn directories(config: &Configuration) -> Vec<&'static str> {
    let mut dirs = Vec::new();

    if config.flag("supported_paths.src.enable") {
        dirs.push("src");
        if config.flag("supported_paths.src.shaders") {
            dirs.push("src/shaders");
        }
        if config.flag("supported_paths.src.config") {
            dirs.push("src/config");
        }
    }
    if config.flag("supported_paths.public_include") {
        dirs.push("include");
    }
    if config.flag("supported_paths.build") {
        dirs.push("build");
    }
    if config.flag("supported_paths.vendors") {
        dirs.extend(["vendors", "vendors/include", "vendors/lib"]);
    }
    if config.flag("supported_paths.test") {
        dirs.push("test");
    }

    dirs
}

/// The license to write, as `(key, template)`, or `None` when no LICENSE
/// is wanted.
fn selected_license(
    config: &Configuration,
) -> Result<Option<(&'static str, &'static str)>, GenerationError> {
    let key = config.get("share.license").or_else(|| config.get("license"));
    let wanted = if config.contains("share") {
        config.flag("share.enable")
    } else {
        key.is_some()
    };
    if !wanted {
        return Ok(None);
    }

    let Some(key) = key else {
        return Err(GenerationError::InvalidConfiguration {
            key: "share.license".into(),
            reason: "a license is required when share.enable is set".into(),
        });
    };
    let key = match key {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };

    license(&key)
        .map(Some)
        .ok_or_else(|| GenerationError::InvalidLicense {
            license: key,
            known: license_keys().map(str::to_string).collect(),
        })
}

/// `src/config/<prefix>config.h` when the config directory is enabled.
fn config_header_path(config: &Configuration) -> Result<Option<PathBuf>, GenerationError> {
    if !(config.flag("supported_paths.src.enable") && config.flag("supported_paths.src.config")) {
        return Ok(None);
    }

    let prefix = config.str_at("prefix").unwrap_or_default();
    if prefix.contains(['/', '\\']) || prefix.contains("..") {
        return Err(GenerationError::InvalidConfiguration {
            key: "prefix".into(),
            reason: format!("'{prefix}' must not contain path separators"),
        });
    }

    let path = PathBuf::from("src/config").join(format!("{prefix}config.h"));
    debug!(path = %path.display(), "config header enabled");
    Ok(Some(path))
}

fn readme_md() -> &'static str {
    r#"# {{ name }} #

{% if project_type == "lib" or project_type == "dll" %}
# Example Usage

```C
#include <{{ prefix }}.h>
```
{% endif %}

## Changelog ##

release | what's new                          | date
--------|-------------------------------------|---------
0.0.1   | initial                             |

## Building ##

{% if supported_paths.build %}
{{ name }} uses [Premake5](https://premake.github.io/download.html) generated Makefiles and IDE project files.  The generated project files are checked in under `build/` so you don't have to download and use Premake in most cases.
{% endif %}

# Copyright and Credit #

Copyright &copy; {{ copyright_years }} {{ copyright_holder }}. {% if share.enable %}File [LICENSE](LICENSE) covers all files in this repo unless expressly noted.{% endif %}

{{ name }} by {{ author_name }}
<{{ author_email }}>
{% if author_twitter %}[@{{ author_twitter }}](https://www.twitter.com/{{ author_twitter }}) {% endif %}

## Support ##

Directed support for this work is available from the original author under a paid agreement.

[Contact author]({{ author_contact_url }})
"#
}

fn config_h() -> &'static str {
    r#"/*
 * {{ name }} Copyright (C) {{ copyright_years }} {{ copyright_holder }}
 */

#pragma once

{% for etype in execution_types %}
//
// {{ etype|title }}
//
#if defined({{ etype|upper }})
#endif
{% endfor %}
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> Configuration {
        Configuration::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn directories_follow_supported_paths() {
        let cfg = config(
            r#"
supported_paths:
  src:
    enable: true
    shaders: true
    config: false
  public_include: false
  build: true
  vendors: true
  test: true
"#,
        );
        assert_eq!(
            directories(&cfg),
            [
                "src",
                "src/shaders",
                "build",
                "vendors",
                "vendors/include",
                "vendors/lib",
                "test"
            ]
        );
    }

    #[test]
    fn src_subdirectories_need_src() {
        let cfg = config("supported_paths:\n  src:\n    enable: false\n    shaders: true\n");
        assert!(directories(&cfg).is_empty());
    }

    #[test]
    fn no_supported_paths_means_no_directories() {
        assert!(directories(&config("name: Foo\n")).is_empty());
    }

    #[test]
    fn top_level_license_is_used_without_share_section() {
        let (key, text) = selected_license(&config("license: mit\n")).unwrap().unwrap();
        assert_eq!(key, "mit");
        assert!(text.contains("The MIT License"));
    }

    #[test]
    fn disabled_share_suppresses_license() {
        let cfg = config("share:\n  enable: false\n  license: mit\n");
        assert!(selected_license(&cfg).unwrap().is_none());
    }

    #[test]
    fn share_section_license_wins() {
        let cfg = config("license: bogus\nshare:\n  enable: true\n  license: zlib\n");
        assert_eq!(selected_license(&cfg).unwrap().unwrap().0, "zlib");
    }

    #[test]
    fn unknown_license_lists_known_keys() {
        let err = selected_license(&config("license: bogus\n")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid license type: bogus");
        assert!(err.suggestions().iter().any(|s| s.contains("mit")));
    }

    #[test]
    fn enabled_share_without_license_is_rejected() {
        let err = selected_license(&config("share:\n  enable: true\n")).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfiguration { .. }));
    }

    #[test]
    fn config_header_is_prefixed() {
        let cfg = config("prefix: foo_\nsupported_paths:\n  src:\n    enable: true\n    config: true\n");
        assert_eq!(
            config_header_path(&cfg).unwrap(),
            Some(PathBuf::from("src/config/foo_config.h"))
        );
    }

    #[test]
    fn prefix_cannot_escape_the_output_path() {
        let cfg = config("prefix: ../../x\nsupported_paths:\n  src:\n    enable: true\n    config: true\n");
        assert!(config_header_path(&cfg).is_err());
    }

    #[test]
    fn fallback_templates_are_registered() {
        let native = NativeProject::new();
        assert!(native.fallback_template("README_md").unwrap().contains("{{ name }}"));
        assert!(native.fallback_template("config_h").is_some());
        assert!(native.fallback_template("LICENSE").is_none());
    }
}
