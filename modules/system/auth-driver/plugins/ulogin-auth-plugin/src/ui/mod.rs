//! Forms of the uLogin driver.
//!
//! Sign-in and sign-up share one form: the uLogin widget plus a hidden input
//! the widget script fills with the token. The script submits the form
//! itself, so no submit button is rendered.

use auth_driver_sdk::{
    AuthDriverError, AuthUiDriver, FormArea, FormRequest, FormSpec, WidgetKind, WidgetSpec,
};

use crate::domain::client::DRIVER_NAME;

/// Package the widget template and assets live in.
pub const PACKAGE: &str = "auth_ui_ulogin";

/// Template rendering the uLogin widget.
pub const WIDGET_TEMPLATE: &str = "auth_ui_ulogin@widget";

const WIDGET_CSS: &str = "widget-ulogin";

/// UI half of the uLogin driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct ULoginUi;

impl ULoginUi {
    /// Uid of the hidden token input of form `form_uid`.
    ///
    /// Ends in `token`, so the driver picks it up when no plain `token` field
    /// is submitted.
    #[must_use]
    pub fn token_widget_uid(form_uid: &str) -> String {
        format!("{form_uid}-widget-ulogin-token")
    }

    #[must_use]
    pub fn widget_uid(form_uid: &str) -> String {
        format!("{form_uid}-widget-ulogin")
    }

    fn widget_form(request: &FormRequest) -> FormSpec {
        FormSpec {
            uid: request.uid.clone(),
            widgets: vec![
                WidgetSpec {
                    uid: Self::token_widget_uid(&request.uid),
                    kind: WidgetKind::HiddenInput,
                    area: FormArea::Hidden,
                    css: Vec::new(),
                },
                WidgetSpec {
                    uid: Self::widget_uid(&request.uid),
                    kind: WidgetKind::Template {
                        template: WIDGET_TEMPLATE.to_owned(),
                    },
                    area: FormArea::Body,
                    css: vec![WIDGET_CSS.to_owned()],
                },
            ],
            submit_button: false,
        }
    }
}

impl AuthUiDriver for ULoginUi {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn description(&self) -> &str {
        "uLogin"
    }

    fn sign_in_form(&self, request: &FormRequest) -> Result<FormSpec, AuthDriverError> {
        Ok(Self::widget_form(request))
    }

    fn sign_up_form(&self, request: &FormRequest) -> Result<FormSpec, AuthDriverError> {
        Ok(Self::widget_form(request))
    }

    fn restore_account_form(&self, _request: &FormRequest) -> Result<FormSpec, AuthDriverError> {
        Err(AuthDriverError::NotImplemented(
            "uLogin does not support account restoration".to_owned(),
        ))
    }
}
