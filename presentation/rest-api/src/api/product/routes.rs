use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::product::use_cases::get_all::GetAllProductsUseCase;
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::remove::{RemoveProductParams, RemoveProductUseCase};
use business::domain::product::use_cases::save::{SaveProductParams, SaveProductUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{ProductForm, ProductResponse};
use crate::api::product::form::{collect_images, parse_fields};
use crate::api::tags::ApiTags;

pub struct ProductApi {
    save_use_case: Arc<dyn SaveProductUseCase>,
    remove_use_case: Arc<dyn RemoveProductUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
}

impl ProductApi {
    pub fn new(
        save_use_case: Arc<dyn SaveProductUseCase>,
        remove_use_case: Arc<dyn RemoveProductUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    ) -> Self {
        Self {
            save_use_case,
            remove_use_case,
            get_all_use_case,
            get_by_id_use_case,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, Json<ErrorResponse>> {
    Uuid::parse_str(raw).map_err(|_| ErrorResponse::validation("product.invalid_id"))
}

async fn read_form(
    form: ProductForm,
    existing_id: Option<Uuid>,
) -> Result<SaveProductParams, Json<ErrorResponse>> {
    let (raw, uploads) = form.into_parts();
    let fields = parse_fields(raw).map_err(|e| e.into_error_response().1)?;
    let images = collect_images(uploads)
        .await
        .map_err(|e| e.into_error_response().1)?;

    Ok(SaveProductParams {
        fields,
        images,
        existing_id,
    })
}

/// Product catalog API
///
/// Endpoints for listing, creating, updating, and deleting catalog products
/// together with their images.
#[OpenApi]
impl ProductApi {
    /// List all products
    ///
    /// Returns every product sorted by name.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    async fn get_all_products(&self) -> GetAllProductsResponse {
        match self.get_all_use_case.execute().await {
            Ok(products) => {
                let responses: Vec<ProductResponse> =
                    products.into_iter().map(|p| p.into()).collect();
                GetAllProductsResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllProductsResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<String>) -> GetProductByIdResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return GetProductByIdResponse::BadRequest(json),
        };

        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id })
            .await
        {
            Ok(product) => GetProductByIdResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Create a product
    ///
    /// Uploads the submitted images and creates the product. At least one
    /// image is required.
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(&self, form: ProductForm) -> CreateProductResponse {
        let params = match read_form(form, None).await {
            Ok(params) => params,
            Err(json) => return CreateProductResponse::BadRequest(json),
        };

        match self.save_use_case.execute(params).await {
            Ok(product) => CreateProductResponse::Created(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateProductResponse::BadRequest(json),
                    _ => CreateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a product
    ///
    /// Replaces the product fields. When images are submitted they replace
    /// the current ones, which are deleted afterwards; otherwise the current
    /// images are kept.
    #[oai(path = "/products/:id", method = "put", tag = "ApiTags::Products")]
    async fn update_product(&self, id: Path<String>, form: ProductForm) -> UpdateProductResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return UpdateProductResponse::BadRequest(json),
        };
        let params = match read_form(form, Some(id)).await {
            Ok(params) => params,
            Err(json) => return UpdateProductResponse::BadRequest(json),
        };

        match self.save_use_case.execute(params).await {
            Ok(product) => UpdateProductResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateProductResponse::BadRequest(json),
                    404 => UpdateProductResponse::NotFound(json),
                    _ => UpdateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a product
    ///
    /// Removes the product and its images. Deleting an unknown product
    /// succeeds.
    #[oai(path = "/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, id: Path<String>) -> DeleteProductResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(json) => return DeleteProductResponse::BadRequest(json),
        };

        match self
            .remove_use_case
            .execute(RemoveProductParams { id })
            .await
        {
            Ok(_) => DeleteProductResponse::NoContent,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                DeleteProductResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllProductsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
