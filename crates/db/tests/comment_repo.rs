//! Integration tests for the comment repository and the windowed
//! per-movie comment counts that feed the leaderboard.

use chrono::NaiveDate;
use moviesapp_core::date_window::{default_since, DateWindow};
use moviesapp_core::pagination::{PageRequest, COMMENTS_PAGE_SIZE};
use moviesapp_core::types::DbId;
use moviesapp_db::models::comment::CommentListParams;
use moviesapp_db::models::movie::CreateMovie;
use moviesapp_db::repositories::{CommentRepo, MovieRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn create_movie(pool: &PgPool, title: &str) -> DbId {
    let input = CreateMovie {
        title: title.to_string(),
        year: 2000,
        ..Default::default()
    };
    MovieRepo::create_with_ratings(pool, &input)
        .await
        .unwrap()
        .movie
        .id
}

/// Insert a comment with an explicit creation time (noon UTC on `date`).
async fn comment_on(pool: &PgPool, movie_id: DbId, author: &str, date: NaiveDate) {
    sqlx::query(
        "INSERT INTO comments (movie_id, author, body, created_at) \
         VALUES ($1, $2, 'text', ($3::date + TIME '12:00') AT TIME ZONE 'UTC')",
    )
    .bind(movie_id)
    .bind(author)
    .bind(date)
    .execute(pool)
    .await
    .unwrap();
}

fn all_time(today: NaiveDate) -> DateWindow {
    DateWindow { since: default_since(), to: today }
}

// ---------------------------------------------------------------------------
// Test: Create / find / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_timestamp(pool: PgPool) {
    let movie_id = create_movie(&pool, "Alien").await;
    let before = chrono::Utc::now();

    let comment = CommentRepo::create(&pool, movie_id, "Test User", "Test comment description.")
        .await
        .unwrap();

    assert_eq!(comment.movie_id, movie_id);
    assert_eq!(comment.author, "Test User");
    assert_eq!(comment.body, "Test comment description.");
    assert!(comment.created_at >= before - chrono::Duration::seconds(5));

    let found = CommentRepo::find_by_id(&pool, comment.id).await.unwrap().unwrap();
    assert_eq!(found.created_at, comment.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_on_missing_movie_fails(pool: PgPool) {
    let result = CommentRepo::create(&pool, 424_242, "ghost", "boo").await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_orders(pool: PgPool) {
    let alien = create_movie(&pool, "Alien").await;
    let heat = create_movie(&pool, "Heat").await;
    comment_on(&pool, alien, "bob", ymd(2020, 1, 3)).await;
    comment_on(&pool, alien, "ann", ymd(2020, 1, 3)).await;
    comment_on(&pool, heat, "ann", ymd(2020, 1, 1)).await;

    let page = PageRequest::new(None, None, COMMENTS_PAGE_SIZE);

    let all = CommentRepo::list(&pool, &CommentListParams::default(), page)
        .await
        .unwrap();
    let order: Vec<(DbId, &str)> = all.iter().map(|c| (c.movie_id, c.author.as_str())).collect();
    assert_eq!(order, vec![(heat, "ann"), (alien, "ann"), (alien, "bob")]);

    let params = CommentListParams {
        movie: Some(alien),
        ..Default::default()
    };
    assert_eq!(CommentRepo::count(&pool, &params).await.unwrap(), 2);

    let params = CommentListParams {
        user: Some("ann".into()),
        ordering: Some("-movie".into()),
        ..Default::default()
    };
    let by_ann = CommentRepo::list(&pool, &params, page).await.unwrap();
    assert_eq!(by_ann.len(), 2);
    assert_eq!(by_ann[0].movie_id, heat);
}

// ---------------------------------------------------------------------------
// Test: Windowed counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_counts_include_movies_without_comments(pool: PgPool) {
    let a = create_movie(&pool, "A").await;
    let b = create_movie(&pool, "B").await;
    let c = create_movie(&pool, "C").await;
    for _ in 0..3 {
        comment_on(&pool, a, "u", ymd(2021, 6, 1)).await;
    }
    comment_on(&pool, b, "u", ymd(2021, 6, 1)).await;

    let counts = CommentRepo::count_by_movie_in_window(&pool, all_time(ymd(2030, 1, 1)))
        .await
        .unwrap();
    let pairs: Vec<(DbId, i64)> = counts.iter().map(|r| (r.movie_id, r.total_comments)).collect();

    assert_eq!(pairs, vec![(a, 3), (b, 1), (c, 0)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_window_excludes_since_and_includes_to(pool: PgPool) {
    let movie = create_movie(&pool, "Edge").await;
    comment_on(&pool, movie, "u", ymd(2020, 1, 1)).await;
    comment_on(&pool, movie, "u", ymd(2020, 1, 2)).await;
    comment_on(&pool, movie, "u", ymd(2020, 1, 31)).await;
    comment_on(&pool, movie, "u", ymd(2020, 2, 1)).await;

    let window = DateWindow { since: ymd(2020, 1, 1), to: ymd(2020, 1, 31) };
    let counts = CommentRepo::count_by_movie_in_window(&pool, window).await.unwrap();

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].total_comments, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inverted_window_counts_nothing(pool: PgPool) {
    let movie = create_movie(&pool, "Inverted").await;
    comment_on(&pool, movie, "u", ymd(2015, 6, 1)).await;

    let window = DateWindow { since: ymd(2020, 1, 1), to: ymd(2010, 1, 1) };
    let counts = CommentRepo::count_by_movie_in_window(&pool, window).await.unwrap();

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].total_comments, 0);
}
