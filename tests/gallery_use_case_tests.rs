use async_trait::async_trait;
use chrono::Utc;
use gallery_api::{
    entities::{
        gallery_image::{
            BulkDeleteRequest, GalleryImage, GalleryImageChanges, GalleryImageInsert, NewGalleryImage,
            UpdateGalleryImage,
        },
        option_fields::OptionField,
    },
    errors::AppError,
    repositories::gallery_image::GalleryImageRepository,
    use_cases::gallery::GalleryHandler,
};
use mockall::{mock, predicate::*};

const URL: &str = "https://res.cloudinary.com/demo/image/upload/v1/gallery/sunset.jpg";

mock! {
    pub GalleryRepo {}

    #[async_trait]
    impl GalleryImageRepository for GalleryRepo {
        async fn create_image(&self, image: &GalleryImageInsert) -> Result<GalleryImage, AppError>;
        async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError>;
        async fn get_image_by_id(&self, id: i32) -> Result<GalleryImage, AppError>;
        async fn update_image(&self, id: i32, changes: &GalleryImageChanges) -> Result<GalleryImage, AppError>;
        async fn delete_image(&self, id: i32) -> Result<(), AppError>;
        async fn delete_images(&self, ids: &[i32]) -> Result<Vec<i32>, AppError>;
        async fn count_images(&self) -> Result<i64, AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

fn stored(id: i32, caption: Option<&str>) -> GalleryImage {
    let now = Utc::now();
    GalleryImage {
        id,
        cloudinary_url: URL.to_string(),
        caption: caption.map(str::to_string),
        created_at: now,
        updated_at: now,
    }
}

#[actix_rt::test]
async fn create_normalizes_before_inserting() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_create_image()
        .withf(|insert| insert.cloudinary_url == URL && insert.caption.as_deref() == Some("Sunset"))
        .times(1)
        .returning(|insert| Ok(stored(1, insert.caption.as_deref())));

    let handler = GalleryHandler::new(repo);
    let image = handler
        .create_image(NewGalleryImage {
            cloudinary_url: Some(format!(" {URL} ")),
            caption: Some("  Sunset ".into()),
        })
        .await
        .unwrap();

    assert_eq!(image.id, 1);
    assert_eq!(image.caption.as_deref(), Some("Sunset"));
}

#[actix_rt::test]
async fn padded_caption_at_the_limit_is_accepted() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_create_image()
        .withf(|insert| insert.caption.as_ref().is_some_and(|c| c.chars().count() == 2000))
        .times(1)
        .returning(|insert| Ok(stored(2, insert.caption.as_deref())));

    let image = GalleryHandler::new(repo)
        .create_image(NewGalleryImage {
            cloudinary_url: Some(URL.into()),
            caption: Some(format!("   {}   ", "x".repeat(2000))),
        })
        .await
        .unwrap();

    assert_eq!(image.id, 2);
}

#[actix_rt::test]
async fn caption_over_the_limit_never_reaches_the_store() {
    let handler = GalleryHandler::new(MockGalleryRepo::new());

    let err = handler
        .create_image(NewGalleryImage {
            cloudinary_url: Some(URL.into()),
            caption: Some("x".repeat(2001)),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(ref fields) if fields[0].field == "caption"));
}

#[actix_rt::test]
async fn create_without_url_never_reaches_the_store() {
    let handler = GalleryHandler::new(MockGalleryRepo::new());

    let err = handler.create_image(NewGalleryImage::default()).await.unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(ref fields) if fields[0].field == "cloudinary_url"));
}

#[actix_rt::test]
async fn get_missing_image_names_the_id() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_get_image_by_id()
        .with(eq(42))
        .returning(|_| Err(AppError::NotFound("Record not found".into())));

    let err = GalleryHandler::new(repo).get_image(42).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("42")));
}

#[actix_rt::test]
async fn empty_update_is_still_sent_to_the_store() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_update_image()
        .withf(|id, changes| *id == 7 && changes.is_empty())
        .times(1)
        .returning(|id, _| Ok(stored(id, None)));

    let image = GalleryHandler::new(repo)
        .update_image(7, UpdateGalleryImage::default())
        .await
        .unwrap();

    assert_eq!(image.id, 7);
}

#[actix_rt::test]
async fn update_cannot_null_the_url() {
    let handler = GalleryHandler::new(MockGalleryRepo::new());

    let patch = UpdateGalleryImage {
        cloudinary_url: OptionField::SetToNull,
        caption: OptionField::Unchanged,
    };
    let err = handler.update_image(7, patch).await.unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
}

#[actix_rt::test]
async fn delete_reports_the_removed_id() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_delete_image().with(eq(3)).times(1).returning(|_| Ok(()));

    let response = GalleryHandler::new(repo).delete_image(3).await.unwrap();

    assert_eq!(response.image_id, 3);
}

#[actix_rt::test]
async fn delete_missing_image_is_not_found() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_delete_image()
        .returning(|_| Err(AppError::NotFound("Gallery image not found".into())));

    let err = GalleryHandler::new(repo).delete_image(3).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn bulk_delete_deduplicates_ids() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_delete_images()
        .withf(|ids| ids.to_vec() == vec![1, 2, 5])
        .times(1)
        .returning(|_| Ok(vec![1, 5]));

    let response = GalleryHandler::new(repo)
        .delete_images(BulkDeleteRequest { image_ids: vec![5, 1, 2, 5, 1] })
        .await
        .unwrap();

    assert_eq!(response.deleted_ids, vec![1, 5]);
    assert_eq!(response.message, "Deleted 2 image(s)");
}

#[actix_rt::test]
async fn bulk_delete_with_no_matches_is_not_found() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_delete_images().returning(|_| Ok(vec![]));

    let err = GalleryHandler::new(repo)
        .delete_images(BulkDeleteRequest { image_ids: vec![99] })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn bulk_delete_requires_ids() {
    let handler = GalleryHandler::new(MockGalleryRepo::new());

    let err = handler
        .delete_images(BulkDeleteRequest { image_ids: vec![] })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
}

#[actix_rt::test]
async fn connectivity_failures_pass_through() {
    let mut repo = MockGalleryRepo::new();
    repo.expect_list_images()
        .returning(|| Err(AppError::ConnectivityFailure("pool timed out".into())));

    let err = GalleryHandler::new(repo).list_images().await.unwrap_err();

    assert!(matches!(err, AppError::ConnectivityFailure(_)));
}
