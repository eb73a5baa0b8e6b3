//! Render tree.
//!
//! [`View::of`] is a pure function from controller state to what should be
//! on screen. Front ends draw a `View` and never inspect the controller
//! directly, so every rendering decision lives here and can be tested
//! without a terminal.

use crate::config::Suggestion;
use crate::controller::{Controller, Deployment, ViewMode};
use crate::message::{Author, OfferState};
use std::time::Duration;

/// Label of the confirming action.
pub const CONFIRM_LABEL: &str = "Yes";
/// Label of the declining action.
pub const DECLINE_LABEL: &str = "No";

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    Landing(LandingView<'a>),
    Conversation(ConversationView<'a>),
}

/// Zero-message layout: logo, prompt cards and the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingView<'a> {
    pub input: InputView<'a>,
    pub suggestions: &'a [Suggestion],
}

/// Two-pane layout: transcript with input, and the preview panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationView<'a> {
    pub messages: Vec<MessageView<'a>>,
    pub input: InputView<'a>,
    pub preview: Preview<'a>,
}

/// The input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    /// The submit arrow is live whenever the input is non-empty.
    pub submit_enabled: bool,
    pub min_rows: u16,
    pub max_rows: u16,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView<'a> {
    /// Position in the message sequence.
    pub index: usize,
    pub author: Author,
    pub content: &'a str,
    /// Present while the Yes/No pair should be drawn.
    pub actions: Option<OfferActions>,
}

/// The Yes/No pair under an open offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferActions {
    /// Message index to pass to `confirm_build` / `decline_offer`.
    pub offer: usize,
    pub confirm: &'static str,
    pub decline: &'static str,
}

/// Right-hand panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview<'a> {
    /// Static logo.
    Logo,
    /// Step loader playing.
    Loader {
        steps: Vec<&'a str>,
        current: usize,
        step_duration: Duration,
    },
    /// Placeholder frame pointing at `url`.
    Frame { url: &'a str },
}

impl<'a> View<'a> {
    /// Build the render tree for `controller`.
    pub fn of(controller: &'a Controller) -> Self {
        let input = InputView::of(controller);
        match controller.view_mode() {
            ViewMode::Landing => View::Landing(LandingView {
                input,
                suggestions: &controller.config().suggestions,
            }),
            ViewMode::Conversation => View::Conversation(ConversationView {
                messages: messages(controller),
                input,
                preview: Preview::of(controller),
            }),
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            View::Landing(_) => ViewMode::Landing,
            View::Conversation(_) => ViewMode::Conversation,
        }
    }

    pub fn input(&self) -> &InputView<'a> {
        match self {
            View::Landing(landing) => &landing.input,
            View::Conversation(conversation) => &conversation.input,
        }
    }
}

impl<'a> InputView<'a> {
    fn of(controller: &'a Controller) -> Self {
        let config = controller.config();
        Self {
            value: controller.input(),
            placeholder: &config.placeholder,
            submit_enabled: !controller.input().is_empty(),
            min_rows: config.min_rows,
            max_rows: config.max_rows,
        }
    }
}

impl<'a> ConversationView<'a> {
    /// The actions of the most recent open offer, if any.
    pub fn latest_actions(&self) -> Option<OfferActions> {
        self.messages.iter().rev().find_map(|m| m.actions)
    }
}

fn messages(controller: &Controller) -> Vec<MessageView<'_>> {
    controller
        .messages()
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let open = controller
                .offer_state(index)
                .is_some_and(OfferState::is_open);
            MessageView {
                index,
                author: message.author(),
                content: &message.content,
                actions: (message.show_buttons && open).then_some(OfferActions {
                    offer: index,
                    confirm: CONFIRM_LABEL,
                    decline: DECLINE_LABEL,
                }),
            }
        })
        .collect()
}

impl<'a> Preview<'a> {
    fn of(controller: &'a Controller) -> Self {
        match controller.deployment() {
            Deployment::Idle => Preview::Logo,
            Deployment::Building => {
                let loader = controller.loader();
                Preview::Loader {
                    steps: loader.steps().iter().map(|s| s.text.as_str()).collect(),
                    current: loader.current().unwrap_or(0),
                    step_duration: loader.step_duration(),
                }
            }
            Deployment::Deployed => Preview::Frame {
                url: &controller.config().preview_url,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::schedule::Scheduled;

    fn drain(controller: &mut Controller, timers: Vec<Scheduled>) {
        let mut pending = timers;
        while let Some(timer) = pending.pop() {
            pending.extend(controller.apply(timer.event));
        }
    }

    fn replied(text: &str) -> Controller {
        let mut c = Controller::new(Config::default());
        let timers = c.submit(text);
        drain(&mut c, timers);
        c
    }

    #[test]
    fn test_landing_view() {
        let mut c = Controller::new(Config::default());
        let view = View::of(&c);
        assert_eq!(view.mode(), ViewMode::Landing);
        let View::Landing(landing) = view else {
            panic!("expected landing");
        };
        assert_eq!(landing.suggestions.len(), 3);
        assert_eq!(landing.input.placeholder, "What do you want to build?");
        assert!(!landing.input.submit_enabled);
        assert_eq!((landing.input.min_rows, landing.input.max_rows), (1, 5));

        c.set_input(" ");
        assert!(View::of(&c).input().submit_enabled);
    }

    #[test]
    fn test_conversation_view_shows_actions_on_open_offer() {
        let c = replied("Build me a blog");
        let View::Conversation(conversation) = View::of(&c) else {
            panic!("expected conversation");
        };

        assert_eq!(conversation.messages.len(), 3);
        assert_eq!(conversation.messages[0].author, Author::User);
        assert_eq!(conversation.messages[0].content, "Build me a blog");
        assert!(conversation.messages[0].actions.is_none());
        assert!(conversation.messages[1].actions.is_none());
        assert_eq!(
            conversation.messages[2].actions,
            Some(OfferActions {
                offer: 2,
                confirm: "Yes",
                decline: "No",
            })
        );
        assert_eq!(conversation.latest_actions().map(|a| a.offer), Some(2));
        assert_eq!(conversation.preview, Preview::Logo);
    }

    #[test]
    fn test_declined_offer_hides_actions() {
        let mut c = replied("hi");
        let _ = c.decline_offer(2);
        let View::Conversation(conversation) = View::of(&c) else {
            panic!("expected conversation");
        };
        assert!(conversation.messages.iter().all(|m| m.actions.is_none()));
        assert_eq!(conversation.latest_actions(), None);
    }

    #[test]
    fn test_preview_follows_deployment() {
        let mut c = replied("hi");
        let timers = c.confirm_build(2);

        let View::Conversation(building) = View::of(&c) else {
            panic!("expected conversation");
        };
        let Preview::Loader {
            steps,
            current,
            step_duration,
        } = building.preview
        else {
            panic!("expected loader");
        };
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0], "Gathering Project Requirements");
        assert_eq!(current, 0);
        assert_eq!(step_duration, Duration::from_millis(2000));

        drain(&mut c, timers);
        let View::Conversation(deployed) = View::of(&c) else {
            panic!("expected conversation");
        };
        assert_eq!(
            deployed.preview,
            Preview::Frame {
                url: "https://example.com"
            }
        );
    }

    #[test]
    fn test_no_actions_once_a_build_is_confirmed() {
        let mut c = replied("one");
        let timers = c.submit("two");
        drain(&mut c, timers);
        let timers = c.confirm_build(2);

        // The second offer is withdrawn while building.
        let View::Conversation(building) = View::of(&c) else {
            panic!("expected conversation");
        };
        assert_eq!(building.latest_actions(), None);

        drain(&mut c, timers);
        let timers = c.submit("three");
        drain(&mut c, timers);
        assert!(c.confirm_build(8).is_empty());

        let View::Conversation(deployed) = View::of(&c) else {
            panic!("expected conversation");
        };
        assert_eq!(deployed.messages.len(), 9);
        assert!(deployed.messages[8].actions.is_none());
        assert_eq!(deployed.latest_actions(), None);
        assert!(matches!(deployed.preview, Preview::Frame { .. }));
    }
}
