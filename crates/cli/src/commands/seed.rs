//! Seed the catalog with starter data.
//!
//! Inserts delivery districts, a few categories and products, and home page
//! slider banners. Safe to run repeatedly: rows that already exist (matched
//! by their unique slug or name) are skipped, and slider banners are only
//! inserted into an empty carousel.

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use tamarind_commerce::db::{
    CategoryRepository, DistrictRepository, ProductRepository, RepositoryError, SliderRepository,
};
use tamarind_commerce::models::{
    CreateCategoryInput, CreateDistrictInput, CreateProductInput, CreateSliderItemInput,
};

/// Seed the catalog database.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or a database operation
/// fails for a reason other than the row already existing.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = tamarind_commerce::db::create_pool(&database_url).await?;
    info!("Connected to database");

    let districts = seed_districts(&pool).await?;
    let categories = seed_categories(&pool).await?;
    let products = seed_products(&pool).await?;
    let sliders = seed_slider(&pool).await?;

    info!("Seeding complete!");
    info!("  Districts inserted: {districts}");
    info!("  Categories inserted: {categories}");
    info!("  Products inserted: {products}");
    info!("  Slider items inserted: {sliders}");

    Ok(())
}

/// Count an insert, treating a uniqueness conflict as "already seeded".
fn count_insert<T>(result: Result<T, RepositoryError>) -> Result<u32, RepositoryError> {
    match result {
        Ok(_) => Ok(1),
        Err(RepositoryError::Conflict(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

async fn seed_districts(pool: &PgPool) -> Result<u32, RepositoryError> {
    let repo = DistrictRepository::new(pool);
    let rows = [
        ("Dhaka", 60),
        ("Gazipur", 80),
        ("Narayanganj", 80),
        ("Chattogram", 120),
        ("Sylhet", 120),
        ("Khulna", 100),
        ("Rajshahi", 100),
        ("Barishal", 110),
        ("Rangpur", 110),
        ("Mymensingh", 90),
    ];

    let mut inserted = 0;
    for (name, charge) in rows {
        inserted += count_insert(
            repo.create(&CreateDistrictInput {
                name: name.to_string(),
                delivery_charge: Decimal::from(charge),
            })
            .await,
        )?;
    }
    Ok(inserted)
}

async fn seed_categories(pool: &PgPool) -> Result<u32, RepositoryError> {
    let repo = CategoryRepository::new(pool);
    let rows = [
        ("Kitchen & Dining", "kitchen-dining"),
        ("Home Decor", "home-decor"),
        ("Handicrafts", "handicrafts"),
    ];

    let mut inserted = 0;
    for (name, slug) in rows {
        inserted += count_insert(
            repo.create(&CreateCategoryInput {
                name: name.to_string(),
                slug: slug.to_string(),
                description: None,
                image_url: None,
                banner_url: None,
                is_active: true,
            })
            .await,
        )?;
    }
    Ok(inserted)
}

async fn seed_products(pool: &PgPool) -> Result<u32, RepositoryError> {
    let categories = CategoryRepository::new(pool);
    let repo = ProductRepository::new(pool);

    let kitchen = categories.get_by_slug("kitchen-dining").await?;
    let decor = categories.get_by_slug("home-decor").await?;
    let crafts = categories.get_by_slug("handicrafts").await?;

    let rows = [
        ("Clay Teapot", "clay-teapot", "TM-KD-001", 500, Some(450), 24, &kitchen),
        ("Ceramic Dinner Set", "ceramic-dinner-set", "TM-KD-002", 2400, None, 8, &kitchen),
        ("Brass Table Lamp", "brass-table-lamp", "TM-HD-001", 1800, Some(1500), 12, &decor),
        ("Jute Wall Hanging", "jute-wall-hanging", "TM-HD-002", 650, None, 30, &decor),
        ("Nakshi Kantha Throw", "nakshi-kantha-throw", "TM-HC-001", 3200, None, 5, &crafts),
        ("Cane Basket", "cane-basket", "TM-HC-002", 300, None, 40, &crafts),
    ];

    let mut inserted = 0;
    for (name, slug, sku, price, sale, stock, category) in rows {
        inserted += count_insert(
            repo.create(&CreateProductInput {
                name: name.to_string(),
                slug: slug.to_string(),
                description: None,
                price: Decimal::from(price),
                sale_price: sale.map(Decimal::from),
                sku: sku.to_string(),
                stock_quantity: stock,
                category_id: category.as_ref().map(|c| c.id),
                images: vec![],
                is_active: true,
                is_featured: stock < 20,
            })
            .await,
        )?;
    }
    Ok(inserted)
}

async fn seed_slider(pool: &PgPool) -> Result<u32, RepositoryError> {
    let repo = SliderRepository::new(pool);

    // Slider items carry no natural unique key, so only seed an empty
    // carousel.
    if !repo.list(false).await?.is_empty() {
        return Ok(0);
    }

    let rows = [
        ("Handmade for your home", Some("New arrivals every week"), 0),
        ("Monsoon sale", Some("Up to 20% off selected items"), 1),
    ];

    let mut inserted = 0;
    for (title, subtitle, sort_order) in rows {
        repo.create(&CreateSliderItemInput {
            title: title.to_string(),
            subtitle: subtitle.map(ToString::to_string),
            image_url: format!("/uploads/slider/placeholder-{sort_order}.jpg"),
            link_url: Some("/api/products".to_string()),
            sort_order,
            is_active: true,
        })
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}
