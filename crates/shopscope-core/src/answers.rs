//! Answer store for the questionnaire.
//!
//! The store has a fixed shape: nine sections, each with a fixed set of fields.
//! Every field exists from construction and is only ever empty, never absent.
//! Field identifiers are closed enums grouped by value kind, so an update can
//! only carry the value kind its field declares.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Brand,
    Products,
    Payments,
    Shipping,
    Features,
    Tech,
    Content,
    Maintenance,
    Timeline,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Brand,
        Section::Products,
        Section::Payments,
        Section::Shipping,
        Section::Features,
        Section::Tech,
        Section::Content,
        Section::Maintenance,
        Section::Timeline,
    ];

    /// Wire name used in the serialized store.
    pub fn key(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Products => "products",
            Self::Payments => "payments",
            Self::Shipping => "shipping",
            Self::Features => "features",
            Self::Tech => "tech",
            Self::Content => "content",
            Self::Maintenance => "maintenance",
            Self::Timeline => "timeline",
        }
    }
}

/// Single-select fields. An empty token means unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceField {
    HasBranding,
    WebsiteStatus,
    HasVariants,
    UploadMethod,
    ContentReady,
    CategoryStructure,
    ShippingScope,
    RateCalculation,
    HasHostingDomain,
    ContentCreationHelp,
    MaintenancePlan,
}

impl ChoiceField {
    pub const ALL: [ChoiceField; 11] = [
        ChoiceField::HasBranding,
        ChoiceField::WebsiteStatus,
        ChoiceField::HasVariants,
        ChoiceField::UploadMethod,
        ChoiceField::ContentReady,
        ChoiceField::CategoryStructure,
        ChoiceField::ShippingScope,
        ChoiceField::RateCalculation,
        ChoiceField::HasHostingDomain,
        ChoiceField::ContentCreationHelp,
        ChoiceField::MaintenancePlan,
    ];

    pub fn section(self) -> Section {
        match self {
            Self::HasBranding | Self::WebsiteStatus => Section::Brand,
            Self::HasVariants
            | Self::UploadMethod
            | Self::ContentReady
            | Self::CategoryStructure => Section::Products,
            Self::ShippingScope | Self::RateCalculation => Section::Shipping,
            Self::HasHostingDomain => Section::Tech,
            Self::ContentCreationHelp => Section::Content,
            Self::MaintenancePlan => Section::Maintenance,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::HasBranding => "hasBranding",
            Self::WebsiteStatus => "websiteStatus",
            Self::HasVariants => "hasVariants",
            Self::UploadMethod => "uploadMethod",
            Self::ContentReady => "contentReady",
            Self::CategoryStructure => "categoryStructure",
            Self::ShippingScope => "scope",
            Self::RateCalculation => "rateCalculation",
            Self::HasHostingDomain => "hasHostingDomain",
            Self::ContentCreationHelp => "contentCreationHelp",
            Self::MaintenancePlan => "plan",
        }
    }
}

/// Multi-select fields. Tokens keep the order in which they were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiField {
    OnlineMethods,
    OfflineMethods,
    Features,
    ContentSections,
}

impl MultiField {
    pub const ALL: [MultiField; 4] = [
        MultiField::OnlineMethods,
        MultiField::OfflineMethods,
        MultiField::Features,
        MultiField::ContentSections,
    ];

    pub fn section(self) -> Section {
        match self {
            Self::OnlineMethods | Self::OfflineMethods => Section::Payments,
            Self::Features => Section::Features,
            Self::ContentSections => Section::Content,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::OnlineMethods => "onlineMethods",
            Self::OfflineMethods => "offlineMethods",
            Self::Features => "selected",
            Self::ContentSections => "sections",
        }
    }
}

/// Free-text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    DesignReferences,
    CategoryCount,
    ShippingProvider,
    Deadline,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::DesignReferences,
        TextField::CategoryCount,
        TextField::ShippingProvider,
        TextField::Deadline,
    ];

    pub fn section(self) -> Section {
        match self {
            Self::DesignReferences => Section::Brand,
            Self::CategoryCount => Section::Products,
            Self::ShippingProvider => Section::Shipping,
            Self::Deadline => Section::Timeline,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::DesignReferences => "designReferences",
            Self::CategoryCount => "categoryCount",
            Self::ShippingProvider => "provider",
            Self::Deadline => "deadline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Choice(ChoiceField),
    Multi(MultiField),
    Text(TextField),
}

impl FieldId {
    pub fn all() -> impl Iterator<Item = FieldId> {
        ChoiceField::ALL
            .into_iter()
            .map(FieldId::Choice)
            .chain(MultiField::ALL.into_iter().map(FieldId::Multi))
            .chain(TextField::ALL.into_iter().map(FieldId::Text))
    }

    pub fn section(self) -> Section {
        match self {
            Self::Choice(field) => field.section(),
            Self::Multi(field) => field.section(),
            Self::Text(field) => field.section(),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Choice(field) => field.key(),
            Self::Multi(field) => field.key(),
            Self::Text(field) => field.key(),
        }
    }

    /// Dotted path such as `products.uploadMethod`, used in logs.
    pub fn path(self) -> String {
        format!("{}.{}", self.section().key(), self.key())
    }
}

/// Read-side view of a single field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Choice(String),
    Multi(Vec<String>),
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Choice(value) | Self::Text(value) => value.is_empty(),
            Self::Multi(values) => values.is_empty(),
        }
    }
}

/// A single-field change. The variant ties the identifier kind to the value kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Choice(ChoiceField, String),
    Multi(MultiField, Vec<String>),
    Text(TextField, String),
}

impl FieldUpdate {
    pub fn field(&self) -> FieldId {
        match self {
            Self::Choice(field, _) => FieldId::Choice(*field),
            Self::Multi(field, _) => FieldId::Multi(*field),
            Self::Text(field, _) => FieldId::Text(*field),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandAnswers {
    pub has_branding: String,
    pub website_status: String,
    pub design_references: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductAnswers {
    pub has_variants: String,
    pub category_count: String,
    pub upload_method: String,
    pub content_ready: String,
    pub category_structure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentAnswers {
    pub online_methods: Vec<String>,
    pub offline_methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingAnswers {
    pub scope: String,
    pub provider: String,
    pub rate_calculation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureAnswers {
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechAnswers {
    pub has_hosting_domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentAnswers {
    pub sections: Vec<String>,
    pub content_creation_help: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceAnswers {
    pub plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineAnswers {
    pub deadline: String,
}

/// All questionnaire answers, grouped by section.
///
/// Field order of the struct is the serialization order, which keeps the
/// generation payload deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerStore {
    pub brand: BrandAnswers,
    pub products: ProductAnswers,
    pub payments: PaymentAnswers,
    pub shipping: ShippingAnswers,
    pub features: FeatureAnswers,
    pub tech: TechAnswers,
    pub content: ContentAnswers,
    pub maintenance: MaintenanceAnswers,
    pub timeline: TimelineAnswers,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choice(&self, field: ChoiceField) -> &str {
        match field {
            ChoiceField::HasBranding => &self.brand.has_branding,
            ChoiceField::WebsiteStatus => &self.brand.website_status,
            ChoiceField::HasVariants => &self.products.has_variants,
            ChoiceField::UploadMethod => &self.products.upload_method,
            ChoiceField::ContentReady => &self.products.content_ready,
            ChoiceField::CategoryStructure => &self.products.category_structure,
            ChoiceField::ShippingScope => &self.shipping.scope,
            ChoiceField::RateCalculation => &self.shipping.rate_calculation,
            ChoiceField::HasHostingDomain => &self.tech.has_hosting_domain,
            ChoiceField::ContentCreationHelp => &self.content.content_creation_help,
            ChoiceField::MaintenancePlan => &self.maintenance.plan,
        }
    }

    pub fn multi(&self, field: MultiField) -> &[String] {
        match field {
            MultiField::OnlineMethods => &self.payments.online_methods,
            MultiField::OfflineMethods => &self.payments.offline_methods,
            MultiField::Features => &self.features.selected,
            MultiField::ContentSections => &self.content.sections,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::DesignReferences => &self.brand.design_references,
            TextField::CategoryCount => &self.products.category_count,
            TextField::ShippingProvider => &self.shipping.provider,
            TextField::Deadline => &self.timeline.deadline,
        }
    }

    pub fn value(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::Choice(field) => FieldValue::Choice(self.choice(field).to_string()),
            FieldId::Multi(field) => FieldValue::Multi(self.multi(field).to_vec()),
            FieldId::Text(field) => FieldValue::Text(self.text(field).to_string()),
        }
    }

    /// Returns a new store equal to this one except for the updated field.
    pub fn with_update(&self, update: FieldUpdate) -> AnswerStore {
        let mut next = self.clone();
        match update {
            FieldUpdate::Choice(field, value) => *next.choice_slot(field) = value,
            FieldUpdate::Multi(field, values) => *next.multi_slot(field) = values,
            FieldUpdate::Text(field, value) => *next.text_slot(field) = value,
        }
        next
    }

    /// Builds the update that flips `token` in a multi-select field. Other
    /// selected tokens keep their relative order.
    pub fn toggled(&self, field: MultiField, token: &str) -> FieldUpdate {
        let current = self.multi(field);
        let next = if current.iter().any(|value| value == token) {
            current
                .iter()
                .filter(|value| value.as_str() != token)
                .cloned()
                .collect()
        } else {
            let mut next = current.to_vec();
            next.push(token.to_string());
            next
        };
        FieldUpdate::Multi(field, next)
    }

    fn choice_slot(&mut self, field: ChoiceField) -> &mut String {
        match field {
            ChoiceField::HasBranding => &mut self.brand.has_branding,
            ChoiceField::WebsiteStatus => &mut self.brand.website_status,
            ChoiceField::HasVariants => &mut self.products.has_variants,
            ChoiceField::UploadMethod => &mut self.products.upload_method,
            ChoiceField::ContentReady => &mut self.products.content_ready,
            ChoiceField::CategoryStructure => &mut self.products.category_structure,
            ChoiceField::ShippingScope => &mut self.shipping.scope,
            ChoiceField::RateCalculation => &mut self.shipping.rate_calculation,
            ChoiceField::HasHostingDomain => &mut self.tech.has_hosting_domain,
            ChoiceField::ContentCreationHelp => &mut self.content.content_creation_help,
            ChoiceField::MaintenancePlan => &mut self.maintenance.plan,
        }
    }

    fn multi_slot(&mut self, field: MultiField) -> &mut Vec<String> {
        match field {
            MultiField::OnlineMethods => &mut self.payments.online_methods,
            MultiField::OfflineMethods => &mut self.payments.offline_methods,
            MultiField::Features => &mut self.features.selected,
            MultiField::ContentSections => &mut self.content.sections,
        }
    }

    fn text_slot(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::DesignReferences => &mut self.brand.design_references,
            TextField::CategoryCount => &mut self.products.category_count,
            TextField::ShippingProvider => &mut self.shipping.provider,
            TextField::Deadline => &mut self.timeline.deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    fn sample_update(field: FieldId) -> FieldUpdate {
        match field {
            FieldId::Choice(field) => FieldUpdate::Choice(field, format!("{}-v", field.key())),
            FieldId::Multi(field) => {
                FieldUpdate::Multi(field, vec![format!("{}-a", field.key()), "b".to_string()])
            }
            FieldId::Text(field) => FieldUpdate::Text(field, format!("{} text", field.key())),
        }
    }

    fn expected_value(update: &FieldUpdate) -> FieldValue {
        match update {
            FieldUpdate::Choice(_, value) => FieldValue::Choice(value.clone()),
            FieldUpdate::Multi(_, values) => FieldValue::Multi(values.clone()),
            FieldUpdate::Text(_, value) => FieldValue::Text(value.clone()),
        }
    }

    #[test]
    fn update_sets_only_the_named_field() {
        let base = FieldId::all().fold(AnswerStore::new(), |store, field| {
            store.with_update(sample_update(field))
        });

        for target in FieldId::all() {
            let update = match target {
                FieldId::Choice(field) => FieldUpdate::Choice(field, "changed".to_string()),
                FieldId::Multi(field) => FieldUpdate::Multi(field, vec!["changed".to_string()]),
                FieldId::Text(field) => FieldUpdate::Text(field, "changed".to_string()),
            };
            let expected = expected_value(&update);
            let next = base.with_update(update);

            assert_eq!(next.value(target), expected, "field {}", target.path());
            for other in FieldId::all().filter(|field| *field != target) {
                assert_eq!(next.value(other), base.value(other), "field {}", other.path());
            }
        }
    }

    #[test]
    fn update_leaves_the_source_store_untouched() {
        let before = AnswerStore::new();
        let after = before.with_update(FieldUpdate::Choice(
            ChoiceField::UploadMethod,
            "developer".to_string(),
        ));

        assert_eq!(before.products.upload_method, "");
        assert_eq!(after.products.upload_method, "developer");
    }

    #[test]
    fn every_field_belongs_to_a_declared_section() {
        let fields: Vec<FieldId> = FieldId::all().collect();
        assert_eq!(fields.len(), 19);
        for section in Section::ALL {
            assert!(
                fields.iter().any(|field| field.section() == section),
                "section {} has no fields",
                section.key()
            );
        }
    }

    #[test]
    fn toggle_appends_then_removes_preserving_order() {
        let store = AnswerStore::new();
        let store = store.with_update(store.toggled(MultiField::Features, "Blog"));
        let store = store.with_update(store.toggled(MultiField::Features, "Coupons"));
        let store = store.with_update(store.toggled(MultiField::Features, "Taxes"));
        assert_eq!(store.features.selected, vec!["Blog", "Coupons", "Taxes"]);

        let store = store.with_update(store.toggled(MultiField::Features, "Coupons"));
        assert_eq!(store.features.selected, vec!["Blog", "Taxes"]);
    }

    #[test]
    fn serialized_shape_is_complete_even_when_empty() {
        let json = serde_json::to_value(AnswerStore::new()).expect("serialize");
        let Value::Object(sections) = &json else {
            panic!("expected object");
        };
        let mut keys: Vec<&str> = sections.keys().map(String::as_str).collect();
        let mut expected: Vec<&str> = Section::ALL.iter().map(|section| section.key()).collect();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);

        for field in FieldId::all() {
            let value = &json[field.section().key()][field.key()];
            match field {
                FieldId::Multi(_) => assert_eq!(value, &Value::Array(Vec::new())),
                _ => assert_eq!(value, &Value::String(String::new())),
            }
        }
    }

    #[test]
    fn partial_documents_deserialize_into_the_full_shape() {
        let store: AnswerStore = serde_json::from_str(
            r#"{"products":{"uploadMethod":"developer"},"features":{"selected":["Blog"]}}"#,
        )
        .expect("deserialize");

        assert_eq!(store.choice(ChoiceField::UploadMethod), "developer");
        assert_eq!(store.multi(MultiField::Features).to_vec(), vec!["Blog".to_string()]);
        assert_eq!(store.text(TextField::Deadline), "");
        assert!(store.value(FieldId::Choice(ChoiceField::ContentReady)).is_empty());
    }
}
