//! Icon resolution for window headings.
//!
//! The window manager does not draw icons itself; it asks an
//! [`IconResolver`] to turn a request's icon descriptor into something the
//! decorator can display.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Image file referenced by path.
    Image(String),
    /// Themed glyph, e.g. `fa folder`.
    Named { prefix: Option<String>, name: String },
}

impl Icon {
    /// Single-cell glyph used by the terminal decorator.
    pub fn glyph(&self) -> char {
        match self {
            Icon::Image(_) => '▣',
            Icon::Named { name, .. } => match name.as_str() {
                "folder" | "directory" => '▤',
                "terminal" | "console" => '▶',
                "text" | "file" | "document" => '≡',
                "log" => '☰',
                _ => name.chars().next().unwrap_or('■'),
            },
        }
    }
}

pub trait IconResolver: std::fmt::Debug {
    fn render_icon(&self, descriptor: Option<&str>) -> Icon;
}

/// Resolves path-like descriptors to images and everything else to names in
/// the current icon theme.
#[derive(Debug, Clone, Default)]
pub struct ThemeIcons {
    prefix: Option<String>,
}

impl ThemeIcons {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl IconResolver for ThemeIcons {
    fn render_icon(&self, descriptor: Option<&str>) -> Icon {
        match descriptor {
            Some(path) if is_image_path(path) => Icon::Image(path.to_string()),
            other => Icon::Named {
                prefix: self.prefix.clone(),
                name: other.unwrap_or("default").to_string(),
            },
        }
    }
}

/// `/some/dir/name.ext` with a 3 to 5 character alphanumeric extension.
fn is_image_path(descriptor: &str) -> bool {
    let Some(slash) = descriptor.find('/') else {
        return false;
    };
    let rest = &descriptor[slash + 1..];
    let Some(dot) = rest.rfind('.') else {
        return false;
    };
    let ext = &rest[dot + 1..];
    dot > 0
        && (3..=5).contains(&ext.len())
        && ext
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_images() {
        let icons = ThemeIcons::default();
        assert_eq!(
            icons.render_icon(Some("/img/apps/bio.png")),
            Icon::Image("/img/apps/bio.png".into())
        );
        assert_eq!(
            icons.render_icon(Some("assets/logo.svg")),
            Icon::Image("assets/logo.svg".into())
        );
    }

    #[test]
    fn names_carry_theme_prefix() {
        let icons = ThemeIcons::new("fa");
        assert_eq!(
            icons.render_icon(Some("folder")),
            Icon::Named {
                prefix: Some("fa".into()),
                name: "folder".into()
            }
        );
        assert!(matches!(
            icons.render_icon(None),
            Icon::Named { ref name, .. } if name == "default"
        ));
    }

    #[test]
    fn short_or_missing_extensions_are_not_images() {
        assert!(!is_image_path("/img/a.js"));
        assert!(!is_image_path("/img/readme"));
        assert!(!is_image_path("logo.png"));
        assert!(is_image_path("/a/b.jpeg"));
    }

    #[test]
    fn glyphs_fall_back_to_first_letter() {
        let icon = Icon::Named {
            prefix: None,
            name: "editor".into(),
        };
        assert_eq!(icon.glyph(), 'e');
        assert_eq!(Icon::Image("/x/y.png".into()).glyph(), '▣');
    }
}
