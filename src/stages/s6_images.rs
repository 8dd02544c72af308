//! S6 Images: requests the three article images concurrently. Writes
//! into `parallel_results`, not directly into the document — S8 merges.

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::context::ExecutionContext;
use crate::document::ImageSlot;
use crate::providers::image::{ImageGenerator, ImageRequest, ImageRole};

/// Up to 3 concurrent image-generation calls (hero, mid, bottom).
const IMAGE_CONCURRENCY: usize = 3;

/// Result of the image-generation stage, one slot per role. A failed
/// generation leaves its slot `None` rather than aborting the others.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageSet {
    pub hero: ImageSlot,
    pub mid: ImageSlot,
    pub bottom: ImageSlot,
}

fn prompt_for(role: ImageRole, headline: &str) -> String {
    format!("{} image for article titled \"{headline}\"", role.as_str())
}

/// Runs on a snapshot of the context (per the S6/S7 parallel contract);
/// returns a new context with only `parallel_results.images` populated.
pub async fn run(mut ctx: ExecutionContext, images: &dyn ImageGenerator) -> ExecutionContext {
    let headline = ctx
        .document()
        .map(|d| d.headline.clone())
        .unwrap_or_default();

    let semaphore = std::sync::Arc::new(Semaphore::new(IMAGE_CONCURRENCY));
    let roles = [ImageRole::Hero, ImageRole::Mid, ImageRole::Bottom];

    let tasks = roles.iter().map(|&role| {
        let sem = semaphore.clone();
        let prompt = prompt_for(role, &headline);
        async move {
            let _permit = sem.acquire().await.expect("semaphore not closed");
            let result = images
                .generate_image(ImageRequest {
                    prompt,
                    aspect_ratio: "16:9",
                })
                .await;
            (role, result)
        }
    });

    let results = futures::future::join_all(tasks).await;
    let mut set = ImageSet::default();
    for (role, result) in results {
        let slot = match result {
            Ok(image) => ImageSlot {
                url: Some(image.url),
                alt_text: Some(image.alt_text_suggestion),
            },
            Err(err) => {
                ctx.push_error(crate::context::ErrorEntry::new(
                    "S6",
                    "UpstreamHard",
                    format!("image generation failed for {}: {err}", role.as_str()),
                    true,
                ));
                ImageSlot::default()
            }
        };
        match role {
            ImageRole::Hero => set.hero = slot,
            ImageRole::Mid => set.mid = slot,
            ImageRole::Bottom => set.bottom = slot,
        }
    }

    ctx.parallel_results.images = Some(set);
    ctx
}
