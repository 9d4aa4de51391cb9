//! Tag attachment and usage counting through press releases and stories.

use sonaverse_core::content::TagType;
use sonaverse_db::models::press::{CreatePress, UpdatePress};
use sonaverse_db::models::story::CreateStory;
use sonaverse_db::models::tag::{CreateTag, UpdateTag};
use sonaverse_db::repositories::{PressRepo, StoryRepo, TagRepo};
use sonaverse_db::DbPool;

async fn tag(pool: &DbPool, slug: &str) -> i64 {
    let input = CreateTag {
        name_ko: slug.to_string(),
        name_en: None,
        slug: None,
        tag_type: None,
        related_tag_ids: Vec::new(),
    };
    TagRepo::create(pool, &input, slug, TagType::General).await.unwrap().tag.id
}

async fn usage(pool: &DbPool, id: i64) -> i64 {
    TagRepo::find_by_id(pool, id).await.unwrap().unwrap().usage_count
}

fn press(title: &str, tag_ids: Vec<i64>) -> CreatePress {
    CreatePress {
        slug: None,
        press_name_ko: Some("연합뉴스".to_string()),
        press_name_en: None,
        title_ko: title.to_string(),
        title_en: None,
        summary_ko: None,
        summary_en: None,
        body_ko: "본문".to_string(),
        body_en: None,
        external_url: None,
        thumbnail_url: None,
        published_at: None,
        is_published: true,
        is_active: None,
        tag_ids,
    }
}

#[tokio::test]
async fn attaching_and_detaching_adjusts_usage() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let a = tag(&pool, "walker").await;
    let b = tag(&pool, "award").await;

    let created = PressRepo::create(&pool, &press("launch", vec![a, b, a]), "launch", None)
        .await
        .unwrap();
    assert_eq!(created.tags.len(), 2);
    assert_eq!(usage(&pool, a).await, 1);
    assert_eq!(usage(&pool, b).await, 1);

    let update = UpdatePress {
        tag_ids: Some(vec![b]),
        ..Default::default()
    };
    PressRepo::update(&pool, created.press.id, &update, None).await.unwrap().unwrap();
    assert_eq!(usage(&pool, a).await, 0);
    assert_eq!(usage(&pool, b).await, 1);
}

#[tokio::test]
async fn soft_delete_releases_usage() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let a = tag(&pool, "care").await;

    let story = StoryRepo::create(
        &pool,
        &CreateStory {
            slug: None,
            title_ko: "이야기".to_string(),
            title_en: None,
            summary_ko: None,
            summary_en: None,
            body_ko: String::new(),
            body_en: None,
            thumbnail_url: None,
            youtube_url: None,
            is_main: true,
            is_published: true,
            published_at: None,
            tag_ids: vec![a],
        },
        "story-1",
        None,
    )
    .await
    .unwrap();
    let first = press("p", vec![a]);
    PressRepo::create(&pool, &first, "p", None).await.unwrap();
    assert_eq!(usage(&pool, a).await, 2);

    assert!(StoryRepo::soft_delete(&pool, story.story.id).await.unwrap());
    assert_eq!(usage(&pool, a).await, 1);
    assert!(!StoryRepo::soft_delete(&pool, story.story.id).await.unwrap());
    assert_eq!(usage(&pool, a).await, 1);
}

#[tokio::test]
async fn public_press_list_filters_by_tag_and_counts_total() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let a = tag(&pool, "walker").await;

    PressRepo::create(&pool, &press("one", vec![a]), "one", None).await.unwrap();
    PressRepo::create(&pool, &press("two", vec![]), "two", None).await.unwrap();
    let mut draft = press("draft", vec![a]);
    draft.is_published = false;
    PressRepo::create(&pool, &draft, "draft", None).await.unwrap();

    let (all, total) = PressRepo::list_public(&pool, None, 10, 0).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(all.len(), 2);

    let (tagged, total) = PressRepo::list_public(&pool, Some("walker"), 10, 0).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(tagged[0].press.slug, "one");

    let (page, total) = PressRepo::list_public(&pool, None, 1, 1).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(page.len(), 1);

    let (admin, admin_total) = PressRepo::list_admin(&pool, 10, 0).await.unwrap();
    assert_eq!(admin_total, 3);
    assert_eq!(admin.len(), 3);
    assert!(PressRepo::find_public_by_slug(&pool, "draft").await.unwrap().is_none());
}

#[tokio::test]
async fn related_tags_exclude_self_and_can_be_replaced() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let a = tag(&pool, "a").await;
    let b = tag(&pool, "b").await;
    let c = tag(&pool, "c").await;

    let update = UpdateTag {
        name_ko: None,
        name_en: Some("A".to_string()),
        slug: None,
        tag_type: None,
        related_tag_ids: Some(vec![c, a, b, c]),
    };
    let detail = TagRepo::update(&pool, a, &update, None, Some(TagType::Press))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.related_tag_ids, vec![b, c]);
    assert_eq!(detail.tag.tag_type, "press");

    let listed = TagRepo::list(&pool, Some(TagType::Press)).await.unwrap();
    assert_eq!(listed.len(), 1);
}
