use crate::{
    audit,
    catalog,
    dto::products::{CategoryList, CreateProductRequest, ProductList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let needle = query.q.as_deref().map(str::to_ascii_lowercase);
    let mut items: Vec<Product> = state
        .catalog
        .all()
        .into_iter()
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|category| p.category == category)
        })
        .filter(|p| {
            needle.as_deref().is_none_or(|needle| {
                p.name.to_ascii_lowercase().contains(needle)
                    || p.short_description.to_ascii_lowercase().contains(needle)
            })
        })
        .collect();

    let total = items.len() as i64;
    items = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state.catalog.get(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn list_categories() -> ApiResponse<CategoryList> {
    ApiResponse::success(
        "Categories",
        CategoryList {
            items: catalog::PRODUCT_CATEGORIES.to_vec(),
        },
        Some(Meta::empty()),
    )
}

/// Administrative append to the catalog; the content store is otherwise
/// read-only.
pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    if payload.price <= 0 {
        return Err(AppError::BadRequest("price must be positive".to_string()));
    }
    if payload.colors.is_empty() {
        return Err(AppError::BadRequest(
            "at least one color is required".to_string(),
        ));
    }
    if catalog::category(&payload.category).is_none() {
        return Err(AppError::BadRequest(format!(
            "unknown category: {}",
            payload.category
        )));
    }

    let product = Product {
        id: payload.id,
        name: payload.name,
        category: payload.category,
        description: payload.description,
        short_description: payload.short_description,
        price: payload.price,
        original_price: payload.original_price,
        capacity: payload.capacity,
        dimensions: payload.dimensions,
        features: payload.features,
        specifications: payload.specifications,
        images: payload.images,
        colors: payload.colors,
        in_stock: payload.in_stock,
        lead_time: payload.lead_time,
        is_best_seller: payload.is_best_seller,
        is_new: payload.is_new,
    };

    if !state.catalog.insert(product.clone()) {
        return Err(AppError::BadRequest(format!(
            "product id {} is already taken",
            product.id
        )));
    }

    audit::record(
        Some(user.user_id),
        "product_created",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}
