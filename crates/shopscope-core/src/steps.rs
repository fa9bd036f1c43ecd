use super::answers::AnswerStore;
use super::answers::ChoiceField;
use super::answers::FieldId;
use super::answers::MultiField;
use super::answers::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputKind {
    Line,
    Multiline,
    Number,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Radio {
        field: ChoiceField,
        options: &'static [ChoiceOption],
    },
    Checkbox {
        field: MultiField,
        options: &'static [ChoiceOption],
        description: Option<&'static str>,
    },
    Text {
        field: TextField,
        placeholder: Option<&'static str>,
        input: TextInputKind,
    },
}

/// Predicate deciding whether a control is rendered. Evaluated against the
/// current answers on every render; it never touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleWhen {
    Always,
    ChoiceEquals(ChoiceField, &'static str),
}

impl VisibleWhen {
    pub fn holds(self, answers: &AnswerStore) -> bool {
        match self {
            Self::Always => true,
            Self::ChoiceEquals(field, token) => answers.choice(field) == token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    pub label: &'static str,
    pub kind: ControlKind,
    pub visible_when: VisibleWhen,
}

impl ControlSpec {
    pub fn field(&self) -> FieldId {
        match self.kind {
            ControlKind::Radio { field, .. } => FieldId::Choice(field),
            ControlKind::Checkbox { field, .. } => FieldId::Multi(field),
            ControlKind::Text { field, .. } => FieldId::Text(field),
        }
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.kind {
            ControlKind::Radio { options, .. } | ControlKind::Checkbox { options, .. } => options,
            ControlKind::Text { .. } => &[],
        }
    }

    pub fn is_visible(&self, answers: &AnswerStore) -> bool {
        self.visible_when.holds(answers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    pub index: usize,
    pub title: &'static str,
    pub heading: &'static str,
    pub controls: &'static [ControlSpec],
}

impl StepDescriptor {
    pub fn visible_controls<'a>(&'a self, answers: &AnswerStore) -> Vec<&'a ControlSpec> {
        self.controls
            .iter()
            .filter(|control| control.is_visible(answers))
            .collect()
    }

    /// Visible fields that are still empty. Informational only: navigation
    /// never depends on it.
    pub fn unanswered(&self, answers: &AnswerStore) -> Vec<FieldId> {
        self.visible_controls(answers)
            .into_iter()
            .map(ControlSpec::field)
            .filter(|field| answers.value(*field).is_empty())
            .collect()
    }
}

const YES_PARTIAL_NO_BRANDING: [ChoiceOption; 3] = [
    ChoiceOption {
        value: "yes",
        label: "Yes, everything is ready",
    },
    ChoiceOption {
        value: "partial",
        label: "We have a logo but no brand manual",
    },
    ChoiceOption {
        value: "no",
        label: "No, we need design from scratch",
    },
];

const WEBSITE_STATUS: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "new",
        label: "It is a brand new project",
    },
    ChoiceOption {
        value: "redesign",
        label: "A site exists, we want a redesign",
    },
];

const HOSTING_DOMAIN: [ChoiceOption; 3] = [
    ChoiceOption {
        value: "yes",
        label: "Yes, we have both",
    },
    ChoiceOption {
        value: "partial",
        label: "We have a domain but no hosting",
    },
    ChoiceOption {
        value: "no",
        label: "No, we need advice",
    },
];

const HAS_VARIANTS: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "yes",
        label: "Yes, they have variants",
    },
    ChoiceOption {
        value: "no",
        label: "No, they are simple products",
    },
];

const UPLOAD_METHOD: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "client",
        label: "We will upload them (training required)",
    },
    ChoiceOption {
        value: "developer",
        label: "We need you to upload them",
    },
];

const CONTENT_READY: [ChoiceOption; 3] = [
    ChoiceOption {
        value: "yes",
        label: "Yes, all ready",
    },
    ChoiceOption {
        value: "partial",
        label: "We are working on it",
    },
    ChoiceOption {
        value: "no",
        label: "No, we need help",
    },
];

const CATEGORY_STRUCTURE: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "simple",
        label: "Simple (one level)",
    },
    ChoiceOption {
        value: "complex",
        label: "Complex (categories and sub-categories)",
    },
];

const ONLINE_METHODS: [ChoiceOption; 5] = [
    ChoiceOption {
        value: "Stripe",
        label: "Stripe (credit/debit card)",
    },
    ChoiceOption {
        value: "PayPal",
        label: "PayPal",
    },
    ChoiceOption {
        value: "MercadoPago",
        label: "MercadoPago",
    },
    ChoiceOption {
        value: "PayU",
        label: "PayU",
    },
    ChoiceOption {
        value: "BankGateway",
        label: "Direct bank gateway",
    },
];

const OFFLINE_METHODS: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "Transfer",
        label: "Bank transfer",
    },
    ChoiceOption {
        value: "COD",
        label: "Cash on delivery",
    },
];

const SHIPPING_SCOPE: [ChoiceOption; 3] = [
    ChoiceOption {
        value: "local",
        label: "Local only (same city)",
    },
    ChoiceOption {
        value: "national",
        label: "National",
    },
    ChoiceOption {
        value: "international",
        label: "International",
    },
];

const RATE_CALCULATION: [ChoiceOption; 3] = [
    ChoiceOption {
        value: "fixed",
        label: "Flat rate",
    },
    ChoiceOption {
        value: "zone",
        label: "By zone / region",
    },
    ChoiceOption {
        value: "automatic",
        label: "Automatic carrier integration (FedEx, DHL...)",
    },
];

const FEATURES: [ChoiceOption; 9] = [
    ChoiceOption {
        value: "Blog",
        label: "Blog / news",
    },
    ChoiceOption {
        value: "Bookings",
        label: "Online bookings / appointments",
    },
    ChoiceOption {
        value: "WhatsApp",
        label: "Floating WhatsApp button",
    },
    ChoiceOption {
        value: "SocialShop",
        label: "Instagram/Facebook Shop integration",
    },
    ChoiceOption {
        value: "Coupons",
        label: "Coupon system",
    },
    ChoiceOption {
        value: "UserAccount",
        label: "Customer area / order history",
    },
    ChoiceOption {
        value: "Taxes",
        label: "Automatic tax calculation",
    },
    ChoiceOption {
        value: "MultiLanguage",
        label: "Multi-language",
    },
    ChoiceOption {
        value: "Newsletter",
        label: "Newsletter subscription pop-up",
    },
];

const CONTENT_SECTIONS: [ChoiceOption; 6] = [
    ChoiceOption {
        value: "Home",
        label: "Home",
    },
    ChoiceOption {
        value: "About",
        label: "About us",
    },
    ChoiceOption {
        value: "Services",
        label: "Services",
    },
    ChoiceOption {
        value: "Contact",
        label: "Contact",
    },
    ChoiceOption {
        value: "FAQ",
        label: "Frequently asked questions",
    },
    ChoiceOption {
        value: "Legal",
        label: "Privacy policy / terms",
    },
];

const CONTENT_CREATION_HELP: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "client_provides",
        label: "Yes, we deliver all the material",
    },
    ChoiceOption {
        value: "needs_help",
        label: "We need help writing/creating it",
    },
];

const MAINTENANCE_PLAN: [ChoiceOption; 2] = [
    ChoiceOption {
        value: "monthly",
        label: "Monthly plan (updates, security, minor changes)",
    },
    ChoiceOption {
        value: "none",
        label: "Project hand-off only (we take it from there)",
    },
];

const BRAND_CONTROLS: [ControlSpec; 5] = [
    ControlSpec {
        label: "Do you have a logo, brand colors and a brand manual?",
        kind: ControlKind::Radio {
            field: ChoiceField::HasBranding,
            options: &YES_PARTIAL_NO_BRANDING,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "What is the state of the website?",
        kind: ControlKind::Radio {
            field: ChoiceField::WebsiteStatus,
            options: &WEBSITE_STATUS,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Do you already have hosting and a domain?",
        kind: ControlKind::Radio {
            field: ChoiceField::HasHostingDomain,
            options: &HOSTING_DOMAIN,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Any design references or example sites you like?",
        kind: ControlKind::Text {
            field: TextField::DesignReferences,
            placeholder: Some("e.g. the clean look of apple.com or the colors of..."),
            input: TextInputKind::Multiline,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Is there a launch deadline?",
        kind: ControlKind::Text {
            field: TextField::Deadline,
            placeholder: Some("YYYY-MM-DD"),
            input: TextInputKind::Date,
        },
        visible_when: VisibleWhen::Always,
    },
];

const PRODUCT_CONTROLS: [ControlSpec; 5] = [
    ControlSpec {
        label: "Do products come in variants? (sizes, colors, materials)",
        kind: ControlKind::Radio {
            field: ChoiceField::HasVariants,
            options: &HAS_VARIANTS,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Roughly how many categories are there?",
        kind: ControlKind::Text {
            field: TextField::CategoryCount,
            placeholder: Some("e.g. 5 (shoes, shirts, trousers...)"),
            input: TextInputKind::Number,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Who will upload the products?",
        kind: ControlKind::Radio {
            field: ChoiceField::UploadMethod,
            options: &UPLOAD_METHOD,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Are product photos and descriptions ready?",
        kind: ControlKind::Radio {
            field: ChoiceField::ContentReady,
            options: &CONTENT_READY,
        },
        visible_when: VisibleWhen::ChoiceEquals(ChoiceField::UploadMethod, "developer"),
    },
    ControlSpec {
        label: "Category structure?",
        kind: ControlKind::Radio {
            field: ChoiceField::CategoryStructure,
            options: &CATEGORY_STRUCTURE,
        },
        visible_when: VisibleWhen::Always,
    },
];

const PAYMENT_SHIPPING_CONTROLS: [ControlSpec; 4] = [
    ControlSpec {
        label: "Online payment methods wanted",
        kind: ControlKind::Checkbox {
            field: MultiField::OnlineMethods,
            options: &ONLINE_METHODS,
            description: None,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Offline methods",
        kind: ControlKind::Checkbox {
            field: MultiField::OfflineMethods,
            options: &OFFLINE_METHODS,
            description: None,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Shipping reach",
        kind: ControlKind::Radio {
            field: ChoiceField::ShippingScope,
            options: &SHIPPING_SCOPE,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Rate calculation",
        kind: ControlKind::Radio {
            field: ChoiceField::RateCalculation,
            options: &RATE_CALCULATION,
        },
        visible_when: VisibleWhen::Always,
    },
];

const FEATURE_CONTROLS: [ControlSpec; 1] = [ControlSpec {
    label: "Select the additional features you need:",
    kind: ControlKind::Checkbox {
        field: MultiField::Features,
        options: &FEATURES,
        description: Some("Tick everything that applies to your business model."),
    },
    visible_when: VisibleWhen::Always,
}];

const CONTENT_CONTROLS: [ControlSpec; 3] = [
    ControlSpec {
        label: "Site sections (besides the shop)",
        kind: ControlKind::Checkbox {
            field: MultiField::ContentSections,
            options: &CONTENT_SECTIONS,
            description: None,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Will you deliver finished texts and images?",
        kind: ControlKind::Radio {
            field: ChoiceField::ContentCreationHelp,
            options: &CONTENT_CREATION_HELP,
        },
        visible_when: VisibleWhen::Always,
    },
    ControlSpec {
        label: "Post-launch maintenance plan",
        kind: ControlKind::Radio {
            field: ChoiceField::MaintenancePlan,
            options: &MAINTENANCE_PLAN,
        },
        visible_when: VisibleWhen::Always,
    },
];

pub const STEPS: [StepDescriptor; 5] = [
    StepDescriptor {
        index: 0,
        title: "Brand & Business",
        heading: "Brand and Business",
        controls: &BRAND_CONTROLS,
    },
    StepDescriptor {
        index: 1,
        title: "Products",
        heading: "Catalog and Products",
        controls: &PRODUCT_CONTROLS,
    },
    StepDescriptor {
        index: 2,
        title: "Payments & Shipping",
        heading: "Payments and Shipping",
        controls: &PAYMENT_SHIPPING_CONTROLS,
    },
    StepDescriptor {
        index: 3,
        title: "Features",
        heading: "Extra Features",
        controls: &FEATURE_CONTROLS,
    },
    StepDescriptor {
        index: 4,
        title: "Content & Wrap-up",
        heading: "Content and Completion",
        controls: &CONTENT_CONTROLS,
    },
];

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn last_step_index() -> usize {
    STEPS.len() - 1
}

pub fn step(index: usize) -> Option<&'static StepDescriptor> {
    STEPS.get(index)
}
