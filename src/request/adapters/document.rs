//! MiniJinja-backed official document renderer.

use async_trait::async_trait;
use minijinja::{Environment, context};

use crate::request::{
    domain::LoanRequest,
    ports::{DocumentError, DocumentResult, OfficialDocument, OfficialDocumentRenderer},
};

/// Template name registered in the environment.
const TEMPLATE_NAME: &str = "official_loan_document";

/// Official loan confirmation layout. Carries the full data set the
/// renderer must receive: request metadata, beneficiary and contact
/// details, requirements, and the per-device identifier table.
const TEMPLATE: &str = "\
OFFICIAL LOAN CONFIRMATION
==========================

Request:    {{ request_id }}
Submitted:  {{ created_at }}
Status:     {{ status }}

BENEFICIARY
Name:       {{ beneficiary.last_name }} {{ beneficiary.first_name }}
School:     {{ beneficiary.school }}{% if beneficiary.class_name %}
Class:      {{ beneficiary.class_name }}{% endif %}{% if beneficiary.category %}
Category:   {{ beneficiary.category }}{% endif %}{% if beneficiary.reference_person %}
Reference:  {{ beneficiary.reference_person }}{% endif %}{% if phone %}
Phone:      {{ phone }}{% endif %}{% if address %}
Address:    {{ address }}{% endif %}

DEVICES
{% for row in devices -%}
- {{ row.kind }}: serial {{ row.serial }}, asset tag {{ row.asset_tag }}
{% endfor %}
APPLICATION REQUIREMENTS
{{ application_requirements }}

LOGISTICS
Pickup:     {{ pickup_location }}
Loan ends:  {{ loan_end }}
";

/// Placeholder shown for identifiers not yet recorded.
const NOT_RECORDED: &str = "not recorded";

/// Renders the official loan document from an embedded MiniJinja template.
#[derive(Debug)]
pub struct MiniJinjaDocumentRenderer {
    environment: Environment<'static>,
}

impl MiniJinjaDocumentRenderer {
    /// Creates a renderer with the embedded template registered.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Render`] when the template fails to parse.
    pub fn new() -> DocumentResult<Self> {
        let mut environment = Environment::new();
        environment
            .add_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|err| DocumentError::Render(err.to_string()))?;
        Ok(Self { environment })
    }
}

#[async_trait]
impl OfficialDocumentRenderer for MiniJinjaDocumentRenderer {
    async fn render(&self, request: &LoanRequest) -> DocumentResult<OfficialDocument> {
        let device_rows: Vec<_> = request
            .devices()
            .iter()
            .map(|device| {
                context! {
                    kind => device.as_str(),
                    serial => request
                        .device_serials()
                        .get(device)
                        .map_or(NOT_RECORDED, String::as_str),
                    asset_tag => request
                        .device_asset_tags()
                        .get(device)
                        .filter(|tag| !tag.is_empty())
                        .map_or(NOT_RECORDED, |tag| tag.as_str()),
                }
            })
            .collect();

        let template = self
            .environment
            .get_template(TEMPLATE_NAME)
            .map_err(|err| DocumentError::Render(err.to_string()))?;
        let content = template
            .render(context! {
                request_id => request.id().to_string(),
                created_at => request.created_at().format("%Y-%m-%d").to_string(),
                status => request.status().as_str(),
                beneficiary => minijinja::Value::from_serialize(request.beneficiary()),
                phone => request.contact().phone(),
                address => request.contact().address(),
                devices => device_rows,
                application_requirements => request.application_requirements(),
                pickup_location => request.logistics().pickup_location(),
                loan_end => request.logistics().loan_end(),
            })
            .map_err(|err| DocumentError::Render(err.to_string()))?;

        Ok(OfficialDocument {
            request_id: request.id(),
            content,
        })
    }
}
