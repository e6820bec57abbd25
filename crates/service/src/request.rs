use serde_json::Value;
use uuid::Uuid;

use cloudmodel_core::{ModelResult, ValueObject, WireFields, wire};

/// Wire name of the dry-run flag.
pub const DRY_RUN_FIELD: &str = "DryRun";

/// A request value object bound to one API action (request abstraction).
///
/// Every request has exactly one response type. The transport builds the
/// response from the payload the service returns, so a caller never picks the
/// response type by hand.
///
/// ## Request vs Response
///
/// - **Request**: populated by the caller, usually with chained `with_*` calls,
///   then only read
/// - **Response**: populated from wire fields, then only read
///
/// Both are plain value objects; this trait only records the pairing.
pub trait ServiceRequest: ValueObject {
    type Response: ValueObject;

    /// API action name, e.g. `"DescribeSecurityGroups"`.
    const ACTION: &'static str;
}

/// Requests that accept a `DryRun` parameter.
///
/// A dry run asks the service to check permissions and parameters without
/// doing the work.
pub trait DryRunSupported: ServiceRequest {
    /// Wire fields of this request with `DryRun` forced to `true`.
    ///
    /// The request itself is left untouched.
    fn dry_run_fields(&self) -> ModelResult<WireFields> {
        let mut fields = wire::to_fields(self)?;
        fields.insert(DRY_RUN_FIELD.to_string(), Value::Bool(true));
        Ok(fields)
    }
}

/// Requests carrying a `ClientToken` for idempotent retries.
pub trait IdempotentRequest: ServiceRequest {
    fn client_token(&self) -> Option<&str>;

    fn set_client_token(&mut self, token: Option<String>);

    /// Fill an absent client token with a fresh one and return the token in use.
    ///
    /// A token the caller already set is never replaced, so a retried request
    /// keeps its identity.
    fn ensure_client_token(&mut self) -> &str {
        if self.client_token().is_none() {
            let token = Uuid::now_v7().to_string();
            tracing::debug!(action = Self::ACTION, %token, "generated client token");
            self.set_client_token(Some(token));
        }
        self.client_token().unwrap_or_default()
    }
}

/// Bind a request type to its response type and action name.
///
/// Optional capabilities:
/// - `dry_run`: implements [`DryRunSupported`]
/// - `client_token`: implements [`IdempotentRequest`] over a
///   `value client_token: String` field
///
/// ```ignore
/// service_request!(CreateVolumeRequest => Volume, action = "CreateVolume", dry_run, client_token);
/// ```
#[macro_export]
macro_rules! service_request {
    (@capability dry_run $request:ty) => {
        impl $crate::DryRunSupported for $request {}
    };
    (@capability client_token $request:ty) => {
        impl $crate::IdempotentRequest for $request {
            fn client_token(&self) -> ::std::option::Option<&str> {
                <$request>::client_token(self).map(::std::string::String::as_str)
            }

            fn set_client_token(&mut self, token: ::std::option::Option<::std::string::String>) {
                <$request>::set_client_token(self, token)
            }
        }
    };
    ($request:ty => $response:ty, action = $action:literal $(, $capability:ident)* $(,)?) => {
        impl $crate::ServiceRequest for $request {
            type Response = $response;
            const ACTION: &'static str = $action;
        }

        $( $crate::service_request!(@capability $capability $request); )*
    };
}
