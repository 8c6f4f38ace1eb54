mod common;

use isaacbot::bot::Button;
use isaacbot::errors::ResolveError;

#[tokio::test]
async fn start_sends_greeting_with_photo() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("/start").await.unwrap();
    assert_eq!(reply.text, config.bot.welcome_message);
    assert_eq!(reply.image, config.bot.start_photo);
}

#[tokio::test]
async fn found_entity_offers_its_sections() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("a pony").await.unwrap();
    assert!(reply.text.starts_with("*A PONY*\n\n_Flight + flight speed_"));
    assert_eq!(reply.image.as_deref(), Some("https://img.example/pony.png"));
    assert_eq!(
        reply.buttons,
        vec![
            Button::new("Effect", "Effect/Item/A Pony"),
            Button::new("Description", "Description/Item/A Pony"),
        ]
    );
}

#[tokio::test]
async fn entity_without_sections_has_no_buttons() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("abaddon").await.unwrap();
    assert!(reply.text.starts_with("*ABADDON*"));
    assert!(reply.buttons.is_empty());
}

#[tokio::test]
async fn ambiguous_query_offers_candidates() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("A Po").await.unwrap();
    assert_eq!(
        reply.text,
        "\"A Po\" was not found, but here are some similar possibilities."
    );
    assert_eq!(reply.buttons[0], Button::new("A Pony", "Item/A Pony"));
    assert_eq!(reply.buttons[1], Button::new("A Pound of Flesh", "Item/A Pound of Flesh"));
}

#[tokio::test]
async fn candidate_callback_confirms_entity() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_callback("Item/A Pound of Flesh").await.unwrap();
    assert!(reply.text.starts_with("*A POUND OF FLESH*"));
    assert!(reply.text.contains("Added in *Afterbirth †*"));
    assert_eq!(reply.buttons.len(), 3);
}

#[tokio::test]
async fn section_callback_returns_section_text() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_callback("Effects/Item/A Pony").await.unwrap();
    assert!(reply.text.starts_with("*Effects*:"));
    let reply = bot.handle_callback("Trivia/Item/A Pony").await.unwrap();
    assert_eq!(reply.text, "No information was found for section Trivia");
}

#[tokio::test]
async fn link_only_entry_is_answered_with_wiki_link() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("Options?").await.unwrap();
    assert_eq!(reply.buttons, vec![Button::new("Options?", "Item/Options?")]);
    let reply = bot.handle_callback("Item/Options?").await.unwrap();
    assert!(reply
        .text
        .contains("(https://bindingofisaacrebirth.fandom.com/wiki/Options%3F)"));
}

#[tokio::test]
async fn unmatched_query_says_not_found() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("xyzzy").await.unwrap();
    assert_eq!(reply.text, "\"xyzzy\" was not found.");
    assert!(reply.buttons.is_empty());
}

#[tokio::test]
async fn listing_commands_show_catalog_buttons() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("/runes").await.unwrap();
    assert_eq!(reply.text, "*Runes*");
    assert_eq!(reply.buttons, vec![Button::new("Hagalaz", "Rune/Hagalaz")]);
    let reply = bot.handle_message("/curses").await.unwrap();
    assert_eq!(reply.buttons.len(), 2);
    let reply = bot.handle_callback(&reply.buttons[1].data).await.unwrap();
    assert_eq!(reply.text, "*CURSE OF THE LOST*\n\nThe map is hidden.");
}

#[tokio::test]
async fn achievement_command() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    let reply = bot.handle_message("/achievement 1").await.unwrap();
    assert!(reply.text.starts_with("*1. Magdalene*"));
    let reply = bot.handle_message("/achievement 700").await.unwrap();
    assert!(reply.text.starts_with("There is no achievement 700"));
    let reply = bot.handle_message("/achievement").await.unwrap();
    assert!(reply.text.starts_with("Usage: /achievement"));
}

#[tokio::test]
async fn fun_commands_need_no_data() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    assert!(bot.handle_message("/run").await.unwrap().text.starts_with("Character: "));
    assert!(bot.handle_message("/challenge").await.unwrap().text.starts_with("Challenge: "));
}

#[tokio::test]
async fn garbage_callback_is_rejected() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    assert!(matches!(
        bot.handle_callback("nonsense").await,
        Err(ResolveError::InvalidKey(_))
    ));
}

#[tokio::test]
async fn section_buttons_of_prefixed_names_resolve() {
    let (_tmp, config) = common::fixture();
    let bot = common::bot(&config).await;
    for (query, heading, section) in [
        ("The Sad Onion", "*THE SAD ONION*", "*Effects*:"),
        ("Lil Spewer", "*LIL SPEWER*", "*Effect*:"),
    ] {
        let reply = bot.handle_message(query).await.unwrap();
        assert!(reply.text.starts_with(heading), "{}", reply.text);
        assert!(!reply.buttons.is_empty());
        for button in &reply.buttons {
            assert!(button.data.ends_with(&format!("/Item/{}", query)), "{}", button.data);
            let follow = bot.handle_callback(&button.data).await.unwrap();
            assert!(!follow.text.contains("was not found"), "{} -> {}", button.data, follow.text);
        }
        let first = bot.handle_callback(&reply.buttons[0].data).await.unwrap();
        assert!(first.text.starts_with(section), "{}", first.text);
        let description = bot.handle_callback(&reply.buttons.last().unwrap().data).await.unwrap();
        assert!(description.text.starts_with(heading));
    }
}
