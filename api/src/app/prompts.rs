//! Prompts sent to the generative model by the recommendation endpoints

use crate::domain::entities::{Category, Product};

/// Ask the model for products similar to `target`, answered as IDs
pub fn similar_products_prompt(target: &Product, candidates: &[Product]) -> String {
    let listing = candidates
        .iter()
        .map(|p| {
            format!(
                "ID: {}, Title: {}, Category: {}, Price: ${}",
                p.id, p.title, p.category, p.price
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on this artwork:\n\
         Title: {}\n\
         Category: {}\n\
         Description: {}\n\
         \n\
         From these available products:\n\
         {}\n\
         \n\
         Recommend the top 5 most similar products based on:\n\
         - Same or related category\n\
         - Similar style or technique\n\
         - Comparable price range\n\
         - Similar cultural background\n\
         \n\
         Return only the product IDs as comma-separated list.",
        target.title, target.category, target.description, listing
    )
}

/// Ask the model to suggest artworks for a shopper
pub fn artwork_suggestions_prompt(
    favorite_categories: &[Category],
    price_range: &str,
    liked_products: &[String],
    available: &[Product],
) -> String {
    let categories = if favorite_categories.is_empty() {
        "Not specified".to_string()
    } else {
        favorite_categories
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let liked = if liked_products.is_empty() {
        "None".to_string()
    } else {
        liked_products.join(", ")
    };

    let listing = available
        .iter()
        .map(|p| {
            format!(
                "ID: {}, Title: {}, Category: {}, Price: ${}, Likes: {}",
                p.id, p.title, p.category, p.price, p.like_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "User Preferences:\n\
         - Favorite Categories: {}\n\
         - Price Range: {}\n\
         - Liked Products: {}\n\
         \n\
         Available Products:\n\
         {}\n\
         \n\
         Suggest the best 6 artworks for this user based on:\n\
         - User's category preferences\n\
         - Price range compatibility\n\
         - Popularity (likes count)\n\
         - Variety in recommendations\n\
         - Quality and uniqueness\n\
         \n\
         Return product IDs as comma-separated list with brief reason for each recommendation.",
        categories, price_range, liked, listing
    )
}
