use chrono::NaiveDate;
use seva_gallery::domain::{
    auth::entity::AuthorizedEmail,
    errors::DomainError,
    media::{
        entity::{Bucket, FileType, MediaContent, MediaDraft, MediaItem, MediaStats},
        value_objects::ObjectName,
    },
    preferences::{
        quote::{QUOTES, quote_for_day},
        theme::Theme,
    },
    social::{
        comment::{GUEST_NAME, NewComment},
        toggle::{LikeState, LikeToggle, ToggleAction},
    },
};
use uuid::Uuid;

#[test]
fn file_type_parses_case_insensitively() {
    assert_eq!("IMAGE".parse::<FileType>().unwrap(), FileType::Image);
    assert_eq!(" text ".parse::<FileType>().unwrap(), FileType::Text);
    assert!("gif".parse::<FileType>().is_err());
}

#[test]
fn only_uploaded_kinds_have_buckets() {
    assert_eq!(FileType::Image.bucket(), Some(Bucket::Images));
    assert_eq!(FileType::Video.bucket(), Some(Bucket::Videos));
    assert_eq!(FileType::Audio.bucket(), Some(Bucket::Audios));
    assert_eq!(FileType::Text.bucket(), None);
}

#[test]
fn text_content_never_keeps_a_url() {
    let content = MediaContent::new(FileType::Text, Some("https://x".into())).unwrap();
    assert_eq!(content.url(), "");
    assert!(matches!(
        MediaContent::new(FileType::Image, Some("  ".into())),
        Err(DomainError::ValidationError(_))
    ));
}

#[test]
fn stats_count_each_kind() {
    let now = chrono::Utc::now();
    let items: Vec<MediaItem> = [
        MediaContent::Text,
        MediaContent::Text,
        MediaContent::Image {
            url: "https://cdn/a.png".into(),
        },
    ]
    .into_iter()
    .map(|content| {
        let draft = MediaDraft::new("शीर्षक", None, content).unwrap();
        MediaItem::from_draft(Uuid::now_v7(), draft, now)
    })
    .collect();

    let stats = MediaStats::from_items(&items);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.texts, 2);
    assert_eq!(stats.images, 1);
    assert_eq!(stats.videos + stats.audios, 0);
}

#[test]
fn object_names_are_prefixed_and_safe() {
    let name = ObjectName::new(1700000000000, "दीवाली diya.jpg");
    assert!(name.as_str().starts_with("1700000000000_"));
    assert!(name.as_str().ends_with("diya.jpg"));
    assert!(!name.as_str().contains(' '));
}

#[test]
fn guest_name_applies_to_anonymous_comments() {
    let comment = NewComment::new(Uuid::now_v7(), "  जय श्री राम  ", None, None).unwrap();
    assert_eq!(comment.name, GUEST_NAME);
    assert_eq!(comment.content, "जय श्री राम");
}

#[test]
fn toggle_flips_then_confirms() {
    let mut toggle = LikeToggle::new();
    toggle.resolve(false, 4);
    assert_eq!(toggle.begin().unwrap(), ToggleAction::Like);
    assert!(toggle.is_pending());
    assert_eq!(toggle.confirm(true, 5).unwrap(), LikeState::Liked);
    assert_eq!(toggle.count(), 5);
    assert!(!toggle.is_pending());
}

#[test]
fn theme_toggle_is_an_involution() {
    assert_eq!(Theme::default(), Theme::Light);
    assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
}

#[test]
fn quote_rotates_daily() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let next = day.succ_opt().unwrap();
    assert_ne!(quote_for_day(day), quote_for_day(next));
    assert!(QUOTES.contains(&quote_for_day(day)));
}

#[test]
fn authorized_email_ignores_case_and_whitespace() {
    let email = AuthorizedEmail::new(" Seva@Example.org ");
    assert!(email.matches("seva@example.org"));
    assert!(!email.matches("other@example.org"));
    assert!(!AuthorizedEmail::new("").matches(""));
}
