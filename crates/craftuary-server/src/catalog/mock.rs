use craftuary_db::entities::theme;

/// Static sample catalog, served when the store is unreachable or holds no
/// rows. A freshly provisioned or misconfigured deployment still renders a
/// non-empty storefront this way.
pub fn sample_catalog() -> Vec<theme::Model> {
    let now = chrono::Utc::now().fixed_offset();

    let entry = |id: i32,
                 name: &str,
                 description: &str,
                 category: &str,
                 technology: &str,
                 thumbnail: &str,
                 slug: &str| theme::Model {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        categories: Some(format!("[\"{category}\"]")),
        technology: technology.to_string(),
        thumbnail: thumbnail.to_string(),
        preview_url: format!("https://preview.craftuary.com/{slug}"),
        download_url: format!("https://github.com/craftuary/{slug}"),
        deploy_url: format!(
            "https://vercel.com/new/clone?repository-url=https://github.com/craftuary/{slug}"
        ),
        is_free: true,
        price: 0.0,
        stock_quantity: None,
        downloads: 0,
        views: 0,
        featured: false,
        status: "active".to_string(),
        created_at: now,
        updated_at: now,
    };

    vec![
        entry(
            1,
            "Modern Business Pro",
            "A sleek and professional business website template with modern design elements.",
            "Business",
            "React",
            "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&h=600&fit=crop",
            "modern-business",
        ),
        entry(
            2,
            "Tech Blog Minimalist",
            "Beautiful minimalist blog template optimized for technical content.",
            "Blog",
            "Next.js",
            "https://images.unsplash.com/photo-1499750310107-5fef28a66643?w=800&h=600&fit=crop",
            "tech-blog",
        ),
        entry(
            3,
            "Portfolio Pro",
            "Showcase your work beautifully with this stunning portfolio template.",
            "Portfolio",
            "Vue",
            "https://images.unsplash.com/photo-1507238691740-187a5b1d37b8?w=800&h=600&fit=crop",
            "portfolio-pro",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_non_empty() {
        assert!(!sample_catalog().is_empty());
    }

    #[test]
    fn test_sample_catalog_ids_are_unique() {
        let themes = sample_catalog();
        let mut ids: Vec<i32> = themes.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), themes.len());
    }

    #[test]
    fn test_sample_catalog_entries_are_active_and_free() {
        for t in sample_catalog() {
            assert_eq!(t.status, "active");
            assert!(t.is_free);
            assert_eq!(t.categories_list(), vec![t.category.clone()]);
        }
    }
}
