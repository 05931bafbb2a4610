//! MuntuShop storefront rules

use crate::application::messaging::MessageRouter;
use crate::application::templates;
use crate::domain::entities::{Rule, Trigger};

const GREETING_WORDS: [&str; 3] = ["hi", "hello", "hey"];
const THANKS_WORDS: [&str; 3] = ["thanks", "thank you", "thx"];

/// Build the storefront router. Registration order is matching order.
pub fn storefront_router(prefix: &str) -> MessageRouter {
    MessageRouter::new(|msg| fallback_reply(&msg.text).to_string()).with_rules(storefront_rules(prefix))
}

pub fn storefront_rules(prefix: &str) -> Vec<Rule> {
    vec![
        Rule::new("start", Trigger::command("start", prefix), |msg| {
            templates::main_menu(msg.sender.display_name())
        })
        .with_description("Welcome message with main menu"),
        Rule::new(
            "shopping",
            Trigger::text(["1", "Shopping", "shop", "store"]),
            |_| templates::shopping_menu(),
        )
        .with_description("Shopping service menu"),
        Rule::new("iptv", Trigger::text(["11", "IPTV", "iptv"]), |_| {
            templates::iptv_menu()
        })
        .with_description("IPTV subscription packages"),
        Rule::new("menu", Trigger::text(["menu", "Menu", "MENU"]), |msg| {
            templates::main_menu(msg.sender.display_name())
        })
        .with_description("Return to main menu"),
        Rule::new(
            "help",
            Trigger::text(["help", "Help", "HELP", "support"]),
            |_| templates::help_message(),
        )
        .with_description("Help and support"),
    ]
}

/// Keyword reply for text no rule claimed
pub fn fallback_reply(text: &str) -> &'static str {
    let text = text.to_lowercase();

    if GREETING_WORDS.iter().any(|w| text.contains(w)) {
        templates::GREETING
    } else if THANKS_WORDS.iter().any(|w| text.contains(w)) {
        templates::THANKS
    } else {
        templates::NOT_UNDERSTOOD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Message, User};

    fn route(text: &str) -> (String, String) {
        let reply = storefront_router("/").route(&Message::from_text("243810000000@c.us", text));
        (reply.rule, reply.text)
    }

    #[test]
    fn test_shopping_literals() {
        for text in ["1", "Shopping", "shop", "store"] {
            assert_eq!(route(text), ("shopping".to_string(), templates::shopping_menu()));
        }
    }

    #[test]
    fn test_iptv_literals() {
        for text in ["11", "IPTV", "iptv"] {
            assert_eq!(route(text), ("iptv".to_string(), templates::iptv_menu()));
        }
    }

    #[test]
    fn test_menu_variants_show_main_menu() {
        for text in ["menu", "Menu", "MENU"] {
            assert_eq!(route(text), ("menu".to_string(), templates::main_menu("Customer")));
        }
    }

    #[test]
    fn test_start_uses_sender_name() {
        let msg = Message::from_text("1@c.us", "/start")
            .with_sender(User::new("1@c.us").with_name("Amani"));
        let reply = storefront_router("/").route(&msg);
        assert_eq!(reply.rule, "start");
        assert_eq!(reply.text, templates::main_menu("Amani"));
        assert_eq!(route("start").0, "start");
    }

    #[test]
    fn test_help_literals() {
        for text in ["help", "Help", "HELP", "support"] {
            assert_eq!(route(text), ("help".to_string(), templates::help_message()));
        }
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        assert_eq!(route("SHOP").0, "fallback");
        assert_eq!(route("mEnU").1, templates::NOT_UNDERSTOOD);
        assert_eq!(route("Iptv").1, templates::NOT_UNDERSTOOD);
    }

    #[test]
    fn test_greeting_fallback() {
        for text in ["hi", "Hi there", "HELLO", "hey!", "this"] {
            assert_eq!(route(text), ("fallback".to_string(), templates::GREETING.to_string()));
        }
    }

    #[test]
    fn test_thanks_fallback() {
        for text in ["thanks", "Thank you so much", "THX"] {
            assert_eq!(route(text).1, templates::THANKS);
        }
    }

    #[test]
    fn test_greeting_checked_before_thanks() {
        assert_eq!(fallback_reply("hi, thanks"), templates::GREETING);
    }

    #[test]
    fn test_unknown_input() {
        for text in ["", "2", "browse", "order status", "/stop"] {
            assert_eq!(route(text).1, templates::NOT_UNDERSTOOD, "input {:?}", text);
        }
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<String> = storefront_router("/").rules().map(|r| r.name.clone()).collect();
        assert_eq!(names, ["start", "shopping", "iptv", "menu", "help"]);
    }
}
