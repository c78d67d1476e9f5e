use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{DashboardStats, OrderList, UpdateOrderStatusRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest, UserProfile},
        cart::{AddItemRequest, CartLineView, CartView, ColorRequest, QuantityRequest},
        checkout::{CheckoutPreviewRequest, CheckoutRequest, CheckoutTotals},
        products::{CategoryList, CreateProductRequest, ProductList},
        quote::{CustomerInfo, QuoteRequest, QuoteSubmitted},
    },
    models::{
        CartItem, CartState, Customizations, Dimensions, OrderLine, OrderRecord, Product,
        ProductCategory,
    },
    pricing::PriceBreakdown,
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, checkout, health, params, products, quote},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        products::list_products,
        products::list_categories,
        products::get_product,
        products::create_product,
        cart::view_cart,
        cart::add_item,
        cart::remove_item,
        cart::set_quantity,
        cart::change_quantity,
        cart::set_color,
        cart::clear_cart,
        cart::open_cart,
        cart::close_cart,
        cart::toggle_cart,
        quote::price_quote,
        quote::submit_quote,
        checkout::preview_checkout,
        checkout::submit_checkout,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::dashboard_stats
    ),
    components(
        schemas(
            Product,
            ProductCategory,
            Dimensions,
            CartItem,
            CartState,
            Customizations,
            OrderRecord,
            OrderLine,
            PriceBreakdown,
            LoginRequest,
            RegisterRequest,
            LoginResponse,
            UserProfile,
            CreateProductRequest,
            ProductList,
            CategoryList,
            AddItemRequest,
            QuantityRequest,
            ColorRequest,
            CartView,
            CartLineView,
            QuoteRequest,
            CustomerInfo,
            QuoteSubmitted,
            CheckoutPreviewRequest,
            CheckoutRequest,
            CheckoutTotals,
            OrderList,
            UpdateOrderStatusRequest,
            DashboardStats,
            params::Pagination,
            params::ProductQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<PriceBreakdown>,
            ApiResponse<CheckoutTotals>,
            ApiResponse<OrderRecord>,
            ApiResponse<OrderList>,
            ApiResponse<DashboardStats>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Shopping cart endpoints"),
        (name = "Quote", description = "Quote calculator endpoints"),
        (name = "Checkout", description = "Checkout endpoints"),
        (name = "Admin", description = "Admin dashboard endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
