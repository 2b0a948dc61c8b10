use std::fmt::Write;

use tokio::sync::watch;

use super::text_utils::EscapeHtml;

pub const LOADING_TEXT: &str = "Loading...";
pub const LOADING_CLASS: &str = "loading";
pub const MUTED_CLASS: &str = "muted";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Success {
        text: String,
        attribution: Option<String>,
    },
    Error(String),
}

impl DisplayState {
    pub fn inner_html(&self, error_color: &str) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Loading => EscapeHtml(LOADING_TEXT).to_string(),
            Self::Success { text, attribution } => {
                let mut html = format!("<div><strong>{}</strong></div>", EscapeHtml(text));
                if let Some(attribution) = attribution {
                    let attribution = EscapeHtml(attribution);
                    write!(html, "<div class=\"{MUTED_CLASS}\">— {attribution}</div>").unwrap();
                }
                html
            }
            Self::Error(message) => {
                format!("<div style=\"color: {error_color};\">{}</div>", EscapeHtml(message))
            }
        }
    }
}

/// What the result element currently looks like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub id: &'static str,
    pub classes: Vec<&'static str>,
    pub inner_html: String,
    pub state: DisplayState,
}

impl Region {
    fn add_class(&mut self, class: &'static str) {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| *c != class);
    }

    pub fn outer_html(&self) -> String {
        let mut html = format!("<div id=\"{}\"", self.id);
        if !self.classes.is_empty() {
            write!(html, " class=\"{}\"", self.classes.join(" ")).unwrap();
        }
        write!(html, ">{}</div>", self.inner_html).unwrap();
        html
    }
}

/// The output region the widget renders into. Every change is published to
/// subscribers, the last write wins.
pub struct DisplayRegion {
    region: watch::Sender<Region>,
}

impl DisplayRegion {
    pub fn new(id: &'static str) -> Self {
        let (region, _) = watch::channel(Region {
            id,
            classes: Vec::new(),
            inner_html: String::new(),
            state: DisplayState::Idle,
        });

        Self { region }
    }

    pub fn subscribe(&self) -> watch::Receiver<Region> {
        self.region.subscribe()
    }

    pub fn snapshot(&self) -> Region {
        self.region.borrow().clone()
    }

    pub fn show(&self, state: DisplayState, error_color: &str) {
        self.region.send_modify(|region| {
            match state {
                DisplayState::Loading => {
                    region.add_class(LOADING_CLASS);
                    region.remove_class(MUTED_CLASS);
                }
                DisplayState::Success { .. } | DisplayState::Error(_) => {
                    region.remove_class(LOADING_CLASS);
                }
                DisplayState::Idle => (),
            }

            region.inner_html = state.inner_html(error_color);
            region.state = state;
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_success_html() {
        let state = DisplayState::Success { text: "Why did...".into(), attribution: None };
        assert_eq!(state.inner_html("red"), "<div><strong>Why did...</strong></div>");

        let state = DisplayState::Success {
            text: "Be yourself.".into(),
            attribution: Some("Oscar Wilde".into()),
        };
        assert_eq!(
            state.inner_html("red"),
            "<div><strong>Be yourself.</strong></div><div class=\"muted\">— Oscar Wilde</div>"
        );

        let state = DisplayState::Success { text: "<b>1 & 2</b>".into(), attribution: None };
        assert_eq!(
            state.inner_html("red"),
            "<div><strong>&lt;b&gt;1 &amp; 2&lt;/b&gt;</strong></div>"
        );
    }

    #[test]
    fn test_error_html() {
        let state = DisplayState::Error("Error: HTTP 500".into());
        assert_eq!(
            state.inner_html("#d32f2f"),
            "<div style=\"color: #d32f2f;\">Error: HTTP 500</div>"
        );
    }

    #[test]
    fn test_region_lifecycle() {
        let display = DisplayRegion::new("result");
        assert_eq!(display.snapshot().outer_html(), "<div id=\"result\"></div>");

        display.show(DisplayState::Loading, "red");
        let region = display.snapshot();
        assert_eq!(region.state, DisplayState::Loading);
        assert_eq!(region.outer_html(), "<div id=\"result\" class=\"loading\">Loading...</div>");

        display.show(DisplayState::Loading, "red");
        assert_eq!(display.snapshot().classes, ["loading"]);

        display.show(DisplayState::Error("Oops! Couldn't load a joke.".into()), "red");
        let region = display.snapshot();
        assert!(!region.classes.contains(&LOADING_CLASS));
        assert_eq!(
            region.outer_html(),
            "<div id=\"result\"><div style=\"color: red;\">Oops! Couldn't load a joke.</div></div>"
        );
    }

    #[test]
    fn test_loading_removes_muted() {
        let display = DisplayRegion::new("result");
        display.region.send_modify(|region| region.add_class(MUTED_CLASS));

        display.show(DisplayState::Loading, "red");
        assert_eq!(display.snapshot().classes, ["loading"]);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let display = DisplayRegion::new("result");
        let mut receiver = display.subscribe();

        display.show(DisplayState::Loading, "red");
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().state, DisplayState::Loading);
    }
}
