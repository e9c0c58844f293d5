//! Decorates menu titles with icon markup.
//!
//! The renderer is a pure function from a title and a merged settings
//! record to a decorated title. Context gating is explicit: only the
//! primary page render decorates, every other context gets the title back
//! untouched because it consumes titles as raw data.

use icon_model::{IconAlign, IconPosition, ItemId, ItemSettings};

/// Where the title is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderContext {
    /// Primary page render; the only context that decorates.
    #[default]
    Page,
    /// Administrative screens.
    Admin,
    /// Background or asynchronous requests.
    Background,
}

/// Arguments every render-time filter sees.
pub struct TitleFilterArgs<'a> {
    /// The suggested result so far, starting with the composed title.
    pub decorated: &'a str,
    pub item_id: ItemId,
    pub settings: &'a ItemSettings,
    /// The title before any decoration, even when the label is hidden.
    pub original: &'a str,
}

type TitleFilter = Box<dyn Fn(&TitleFilterArgs<'_>) -> String + Send + Sync>;

/// Ordered render-time transforms. The composed title is only the
/// suggested result; the last registered filter has the final word.
#[derive(Default)]
pub struct RenderHooks {
    filters: Vec<TitleFilter>,
}

impl RenderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        filter: impl Fn(&TitleFilterArgs<'_>) -> String + Send + Sync + 'static,
    ) {
        self.filters.push(Box::new(filter));
    }

    fn apply(
        &self,
        decorated: String,
        item_id: ItemId,
        settings: &ItemSettings,
        original: &str,
    ) -> String {
        let mut current = decorated;
        for filter in &self.filters {
            current = filter(&TitleFilterArgs {
                decorated: &current,
                item_id,
                settings,
                original,
            });
        }
        current
    }
}

/// Escapes a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Class list for the icon element: the icon class itself, then one
/// `wpsmi-<field>-<value>` class per non-default option so presentational
/// CSS can target specific combinations.
fn class_list(settings: &ItemSettings) -> Vec<String> {
    let mut classes = vec![settings.icon.clone()];

    if settings.label {
        classes.push("wpsmi-label-1".to_owned());
    }
    if settings.position != IconPosition::default() {
        classes.push(format!("wpsmi-position-{}", settings.position.as_str()));
    }
    if settings.align != IconAlign::default() {
        classes.push(format!("wpsmi-align-{}", settings.align.as_str()));
    }
    if settings.size != 1.0 {
        classes.push(format!("wpsmi-size-{}", settings.size));
    }

    classes
}

fn inline_style(settings: &ItemSettings) -> String {
    let mut style = String::new();

    if settings.size > 0.0 {
        style.push_str(&format!("font-size:{}em;", settings.size));
    }
    if !settings.color.is_empty() {
        style.push_str(&format!("color:{}", escape_attr(&settings.color)));
    }

    style
}

/// Builds the icon element for a settings record with a configured icon.
pub fn icon_element(settings: &ItemSettings) -> String {
    let classes: Vec<String> =
        class_list(settings).iter().map(|class| escape_attr(class)).collect();
    let classes = classes.join(" ");
    let style = inline_style(settings);

    if style.is_empty() {
        format!(r#"<i class="wpsmi-icon {classes}"></i>"#)
    } else {
        format!(r#"<i style="{style}" class="wpsmi-icon {classes}"></i>"#)
    }
}

/// Produces the decorated title for one menu item.
///
/// Outside [`RenderContext::Page`] this is a strict no-op. With no icon
/// configured the title passes through unchanged, though registered hooks
/// still see it and may override. When the label flag is set the visible
/// title text is suppressed; hooks always receive the original title.
pub fn render_title(
    title: &str,
    item_id: ItemId,
    settings: &ItemSettings,
    context: RenderContext,
    hooks: &RenderHooks,
) -> String {
    if context != RenderContext::Page {
        return title.to_owned();
    }

    if settings.icon.is_empty() {
        return hooks.apply(title.to_owned(), item_id, settings, title);
    }

    let visible = if settings.label { "" } else { title };
    let icon = icon_element(settings);

    let decorated = match settings.position {
        IconPosition::After => format!("{visible}{icon}"),
        IconPosition::Before => format!("{icon}{visible}"),
    };

    hooks.apply(decorated, item_id, settings, title)
}
