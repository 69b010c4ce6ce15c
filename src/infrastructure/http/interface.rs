//! Typed interfaces over a client.

use super::client::ApiClient;

/// A typed view over an [`ApiClient`], usually generated by
/// [`api_interface!`](crate::api_interface).
///
/// Implementations hold nothing but the bound client, so creating one is
/// cheap and they are never cached.
pub trait ApiInterface: Sized {
    /// Wrap `client`
    fn bind(client: ApiClient) -> Self;
}

/// Declares a typed endpoint interface.
///
/// Each method names its HTTP verb, a path template relative to the base URL,
/// and its arguments tagged with how they bind to the request: `path` fills
/// a `{placeholder}`, `query` appends a query parameter, `header` sets a
/// header (underscores in the name become dashes), `body` becomes the JSON
/// body. Every method is `async` and returns `Result<T, ApiError>`, with the
/// response decoded through the client's lenient codec.
///
/// ```
/// use api_factory::api_interface;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Deserialize)]
/// pub struct Product {
///     pub id: i64,
///     pub price: f64,
/// }
///
/// #[derive(Debug, Serialize)]
/// pub struct NewProduct {
///     pub name: String,
/// }
///
/// api_interface! {
///     /// Catalog endpoints
///     pub struct ProductApi {
///         /// Fetch one product
///         GET "products/{id}" => fn product(path id: i64) -> Product;
///         GET "products" => fn search(query q: &str, query page: Option<u32>) -> Vec<Product>;
///         POST "products" => fn create(header x_request_id: &str, body product: &NewProduct) -> Product;
///         DELETE "products/{id}" => fn remove(path id: i64) -> ();
///     }
/// }
/// ```
#[macro_export]
macro_rules! api_interface {
    (
        $(#[$struct_meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $method:ident $path:literal => fn $fn_name:ident (
                    $( $kind:ident $arg:ident : $arg_ty:ty ),* $(,)?
                ) -> $ret:ty;
            )*
        }
    ) => {
        $(#[$struct_meta])*
        #[doc = ""]
        #[doc = "Typed endpoint interface generated by `api_interface!`."]
        #[derive(Debug, Clone)]
        $vis struct $name {
            client: $crate::ApiClient,
        }

        impl $crate::ApiInterface for $name {
            fn bind(client: $crate::ApiClient) -> Self {
                Self { client }
            }
        }

        impl $name {
            /// Client this interface issues requests through
            #[allow(dead_code)]
            pub fn client(&self) -> &$crate::ApiClient {
                &self.client
            }

            $(
                #[doc = ::std::concat!("`", ::std::stringify!($method), " ", $path, "`")]
                #[doc = ""]
                $(#[doc = $doc])*
                pub async fn $fn_name(
                    &self,
                    $( $arg: $arg_ty ),*
                ) -> ::std::result::Result<$ret, $crate::ApiError> {
                    let endpoint = $crate::Endpoint::new($crate::reqwest::Method::$method, $path);
                    #[allow(unused_mut)]
                    let mut call = self.client.call(&endpoint);
                    $( call = $crate::__bind_arg!(call, $kind, $arg); )*
                    call.send().await
                }
            )*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bind_arg {
    ($call:ident, path, $arg:ident) => {
        $call.path_param(::std::stringify!($arg), &$arg)
    };
    ($call:ident, query, $arg:ident) => {
        $call.query(::std::stringify!($arg), &$arg)
    };
    ($call:ident, header, $arg:ident) => {
        $call.header(&::std::stringify!($arg).replace('_', "-"), &$arg)
    };
    ($call:ident, body, $arg:ident) => {
        $call.json(&$arg)
    };
}
