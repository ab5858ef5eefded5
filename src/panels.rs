//! Static quick-action and campus-service data shown beside the chat

use crate::resolver::{classify, Topic};

/// A shortcut that submits a fixed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub icon: &'static str,
    pub label: &'static str,
    pub query: &'static str,
}

impl QuickAction {
    /// Topic the action's question is routed to.
    pub fn topic(&self) -> Topic {
        classify(self.query)
    }
}

/// A display-only service status card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub status: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction { icon: "📅", label: "Class Schedule", query: "Show me my class schedule" },
    QuickAction { icon: "📍", label: "Campus Map", query: "I need directions on campus" },
    QuickAction { icon: "🍴", label: "Dining Hours", query: "What are the dining hall hours?" },
    QuickAction { icon: "📖", label: "Library Services", query: "Tell me about library services" },
    QuickAction {
        icon: "📄",
        label: "Admin Services",
        query: "I need help with administrative procedures",
    },
    QuickAction {
        icon: "👥",
        label: "Student Activities",
        query: "What student activities are available?",
    },
];

pub const STATUS_CARDS: [StatusCard; 4] = [
    StatusCard {
        icon: "📅",
        title: "Academic Calendar",
        description: "Important dates and deadlines",
        status: "Active",
    },
    StatusCard {
        icon: "📍",
        title: "Campus Facilities",
        description: "Buildings, labs, and services",
        status: "Available",
    },
    StatusCard {
        icon: "🍴",
        title: "Dining Services",
        description: "Meal plans and restaurant hours",
        status: "Open",
    },
    StatusCard {
        icon: "📖",
        title: "Library System",
        description: "Resources and study spaces",
        status: "24/7",
    },
];

/// Look up a quick action by its 1-based position, as shown in the panel.
pub fn quick_action(number: usize) -> Option<&'static QuickAction> {
    number.checked_sub(1).and_then(|index| QUICK_ACTIONS.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_actions_route_to_their_topics() {
        let topics: Vec<Topic> = QUICK_ACTIONS.iter().map(QuickAction::topic).collect();
        assert_eq!(
            topics,
            vec![
                Topic::Schedule,
                Topic::Navigation,
                Topic::Dining,
                Topic::Library,
                Topic::Administration,
                Topic::General,
            ]
        );
    }

    #[test]
    fn quick_action_numbers_are_one_based() {
        assert_eq!(quick_action(1).map(|a| a.label), Some("Class Schedule"));
        assert_eq!(quick_action(6).map(|a| a.label), Some("Student Activities"));
        assert!(quick_action(0).is_none());
        assert!(quick_action(7).is_none());
    }

    #[test]
    fn status_cards_keep_reference_order() {
        let statuses: Vec<&str> = STATUS_CARDS.iter().map(|card| card.status).collect();
        assert_eq!(statuses, vec!["Active", "Available", "Open", "24/7"]);
        assert_eq!(STATUS_CARDS[3].title, "Library System");
    }
}
