//! Commercial proposal documents
//!
//! A proposal renders a priced [`Quote`] together with the client's details
//! in Markdown, HTML or PDF. All generators read the same
//! [`ProposalContext`], so the three formats show the same sections and
//! numbers.

pub mod currency;
pub mod formats;

use crate::core::pricing::{ExtraCharge, LineBasis, LineEvaluation, PhaseSubtotal, Quote};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

pub use currency::{format_currency, format_integer};
pub use formats::{HtmlProposal, MarkdownProposal, PdfProposal, ProposalFormat};

/// Validity used when none is configured
pub const DEFAULT_VALIDITY_DAYS: u32 = 30;

/// Currency symbol used when none is configured
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Steps listed after the financial summary
pub const NEXT_STEPS: [&str; 4] = [
    "Análise da Proposta - Revisão dos termos e condições",
    "Reunião de Alinhamento - Definição de cronograma e expectativas",
    "Contrato - Formalização da parceria",
    "Onboarding - Início do treinamento e suporte",
];

/// Company blurb
pub const ABOUT: &str = "A Better Tech é especializada em soluções educacionais inovadoras, \
focada em capacitar educadores com as mais modernas tecnologias de IA. Nossa plataforma TEACH \
representa o futuro da educação brasileira.";

/// Contact lines for questions about the proposal
pub const CONTACT: [&str; 3] = [
    "E-mail: comercial@bettertech.com.br",
    "Telefone: (11) 9999-9999",
    "Site: www.bettertech.com.br",
];

/// Who the proposal is addressed to
///
/// Every field is optional; empty ones render as a bracketed placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientInfo {
    /// Person the proposal is addressed to
    pub client_name: String,
    /// School or institution
    pub school_name: String,
    /// `Cidade/UF`
    pub city_state: String,
    /// Project name
    pub project_name: String,
    /// Contact person
    pub contact_person: String,
    /// Contact e-mail
    pub email: String,
    /// Contact phone
    pub phone: String,
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

impl ClientInfo {
    /// Client name or `[Nome do Cliente]`
    #[must_use]
    pub fn client_name(&self) -> &str {
        or_placeholder(&self.client_name, "[Nome do Cliente]")
    }

    /// School name or `[Nome da Escola]`
    #[must_use]
    pub fn school_name(&self) -> &str {
        or_placeholder(&self.school_name, "[Nome da Escola]")
    }

    /// City/state or `[Cidade/Estado]`
    #[must_use]
    pub fn city_state(&self) -> &str {
        or_placeholder(&self.city_state, "[Cidade/Estado]")
    }

    /// Project name or `[Nome do Projeto]`
    #[must_use]
    pub fn project_name(&self) -> &str {
        or_placeholder(&self.project_name, "[Nome do Projeto]")
    }

    /// Contact person or `[Pessoa de Contato]`
    #[must_use]
    pub fn contact_person(&self) -> &str {
        or_placeholder(&self.contact_person, "[Pessoa de Contato]")
    }

    /// E-mail or `[email@exemplo.com]`
    #[must_use]
    pub fn email(&self) -> &str {
        or_placeholder(&self.email, "[email@exemplo.com]")
    }

    /// Phone or `[Telefone]`
    #[must_use]
    pub fn phone(&self) -> &str {
        or_placeholder(&self.phone, "[Telefone]")
    }

    /// Label/value rows for the client section, in display order
    #[must_use]
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("Cliente", self.client_name()),
            ("Instituição", self.school_name()),
            ("Localização", self.city_state()),
            ("Projeto", self.project_name()),
            ("Contato", self.contact_person()),
            ("E-mail", self.email()),
            ("Telefone", self.phone()),
        ]
    }
}

/// Data context for proposal generation
#[derive(Debug, Clone)]
pub struct ProposalContext<'a> {
    /// The priced quote
    pub quote: &'a Quote<'a>,
    /// Who the proposal is for
    pub client: &'a ClientInfo,
    /// Date printed on the proposal
    pub issue_date: NaiveDate,
    /// Days the proposal stays valid
    pub validity_days: u32,
    /// Symbol printed before amounts
    pub currency_symbol: String,
}

impl<'a> ProposalContext<'a> {
    /// Create a context with the default validity and currency symbol
    #[must_use]
    pub fn new(quote: &'a Quote<'a>, client: &'a ClientInfo, issue_date: NaiveDate) -> Self {
        Self {
            quote,
            client,
            issue_date,
            validity_days: DEFAULT_VALIDITY_DAYS,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Set the validity period
    #[must_use]
    pub const fn with_validity_days(mut self, days: u32) -> Self {
        self.validity_days = days;
        self
    }

    /// Set the currency symbol
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        symbol.clone_into(&mut self.currency_symbol);
        self
    }

    /// Last day the proposal is valid
    #[must_use]
    pub fn valid_until(&self) -> NaiveDate {
        self.issue_date
            .checked_add_days(Days::new(u64::from(self.validity_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Issue date as `dd/mm/yyyy`
    #[must_use]
    pub fn issue_date_label(&self) -> String {
        self.issue_date.format("%d/%m/%Y").to_string()
    }

    /// Validity end as `dd/mm/yyyy`
    #[must_use]
    pub fn valid_until_label(&self) -> String {
        self.valid_until().format("%d/%m/%Y").to_string()
    }

    /// Format an amount with the context's currency symbol
    #[must_use]
    pub fn money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.currency_symbol)
    }

    /// Course offering name
    #[must_use]
    pub fn course_name(&self) -> &'a str {
        &self.quote.course.course.name
    }

    /// Course offering description
    #[must_use]
    pub fn course_description(&self) -> &'a str {
        &self.quote.course.course.description
    }

    /// Included features of the course offering
    #[must_use]
    pub fn course_features(&self) -> &'a [String] {
        &self.quote.course.course.features
    }

    /// Quantity with thousands separators
    #[must_use]
    pub fn quantity_label(&self) -> String {
        format_integer(self.quote.quantity)
    }

    /// `201 a 500 professores`, or a notice when no tier matched
    #[must_use]
    pub fn tier_label(&self) -> String {
        self.quote.course.matched_tier.map_or_else(
            || "Nenhuma faixa de preço para esta quantidade".to_string(),
            |tier| format!("{tier} professores"),
        )
    }

    /// Unit price of the matched tier, or `—`
    #[must_use]
    pub fn tier_price_label(&self) -> String {
        self.quote
            .course
            .matched_tier
            .map_or_else(|| "—".to_string(), |tier| self.money(tier.unit_price))
    }

    /// Average price per unit over the whole quote, or `—` when undefined
    #[must_use]
    pub fn average_label(&self) -> String {
        self.quote
            .average_per_unit()
            .map_or_else(|| "—".to_string(), |avg| self.money(avg))
    }

    /// Priced extras
    #[must_use]
    pub fn extras(&self) -> &'a [ExtraCharge<'a>] {
        &self.quote.course.extras
    }

    /// Selected phases with their lines, in roadmap order
    #[must_use]
    pub fn phases(&self) -> &'a [PhaseSubtotal<'a>] {
        &self.quote.phases.phases
    }

    /// Text shown for one priced line
    #[must_use]
    pub fn line_detail(&self, eval: &LineEvaluation<'_>) -> String {
        let quantity = format_integer(eval.quantity);
        match &eval.basis {
            LineBasis::PerUnit { unit_price } => {
                format!("{quantity} × {}", self.money(*unit_price))
            }
            LineBasis::Tier { tier } => format!(
                "{quantity} × {} (faixa {tier})",
                self.money(tier.unit_price)
            ),
            LineBasis::TierNotFound => format!("{quantity}: sem faixa de preço"),
            LineBasis::Fixed => "Valor fixo".to_string(),
            LineBasis::ManualOverride | LineBasis::ManualDefault => "Valor definido".to_string(),
            LineBasis::MissingManualAmount => "A definir".to_string(),
            LineBasis::Overflow => "Valor acima do limite".to_string(),
        }
    }
}

/// Trait for proposal generators
pub trait ProposalGenerator {
    /// Generate a proposal to a file
    ///
    /// # Errors
    /// Returns an error if rendering, conversion or file writing fails
    fn generate(&self, ctx: &ProposalContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate proposal content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ProposalContext) -> Result<String, Box<dyn Error>>;
}

/// Create a generator for `format`, with an optional PDF converter command
#[must_use]
pub fn generator_for(
    format: ProposalFormat,
    pdf_converter: Option<&str>,
) -> Box<dyn ProposalGenerator> {
    match format {
        ProposalFormat::Markdown => Box::new(MarkdownProposal::new()),
        ProposalFormat::Html => Box::new(HtmlProposal::new()),
        ProposalFormat::Pdf => Box::new(
            pdf_converter.map_or_else(PdfProposal::new, PdfProposal::with_converter),
        ),
    }
}

/// `proposta-<school or cliente>-<YYYY-MM-DD>.<ext>`
#[must_use]
pub fn default_file_name(
    client: &ClientInfo,
    issue_date: NaiveDate,
    format: ProposalFormat,
) -> String {
    let school = slugify(&client.school_name);
    let name = if school.is_empty() {
        "cliente".to_string()
    } else {
        school
    };
    format!(
        "proposta-{name}-{}.{}",
        issue_date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Lowercase ASCII slug with Portuguese accents folded and runs of other
/// characters collapsed into a single `-`
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        };
        if folded.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(folded);
        } else {
            pending_dash = true;
        }
    }
    slug
}
