//! Rule-based extraction: an ordered list of regex rules evaluated
//! top-to-bottom per utterance, first match wins.

use mention_core::errors::{ExtractError, PipelineResult};
use mention_core::{Confidence, LabelType, Mention, Role, Utterance};
use regex::Regex;
use tracing::warn;

/// One extraction rule: a pattern and the classification it assigns.
pub struct ExtractionRule {
    pub pattern: Regex,
    pub theme: &'static str,
    pub subtheme: &'static str,
    pub label_type: LabelType,
}

/// An ordered rule list. Order is significant: the first matching rule
/// wins and no further rules are tried.
pub struct RuleSet {
    rules: Vec<ExtractionRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify one utterance. Non-client turns never match; no matching
    /// rule means no mention for this utterance.
    pub fn apply(&self, utterance: &Utterance) -> Option<Mention> {
        if utterance.role != Role::Client {
            return None;
        }
        let rule = self
            .rules
            .iter()
            .find(|r| r.pattern.is_match(&utterance.text))?;
        Some(Mention {
            dialog_id: utterance.dialog_id.clone(),
            turn_id: utterance.turn_id,
            theme: rule.theme.to_string(),
            subtheme: rule.subtheme.to_string(),
            label_type: rule.label_type,
            text_quote: utterance.text.trim().to_string(),
            confidence: Confidence::new(Confidence::RULE_HIT),
            is_client_only: true,
            has_evidence: true,
        })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        default_rules()
    }
}

fn rule(
    pattern: &str,
    theme: &'static str,
    subtheme: &'static str,
    label_type: LabelType,
) -> PipelineResult<ExtractionRule> {
    let pattern = Regex::new(&format!("(?i){pattern}")).map_err(|e| ExtractError::InvalidRule {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(ExtractionRule {
        pattern,
        theme,
        subtheme,
        label_type,
    })
}

/// The built-in rule set covering the demo taxonomy: delivery, UI,
/// promotion, support, pricing.
pub fn default_rules() -> RuleSet {
    let rules = [
        // Доставка
        rule(
            r"доставк.*(то есть|то работает|то нет|выборочн)",
            "доставка",
            "не работает выборочно",
            LabelType::Barrier,
        ),
        rule(
            r"пункт выдач|ПВЗ|не (работает|включается).*доставк",
            "доставка",
            "не работает выборочно",
            LabelType::Barrier,
        ),
        rule(
            r"вес|габарит|КГТ.*доставк",
            "доставка",
            "вес/габариты/КГТ",
            LabelType::Barrier,
        ),
        rule(
            r"регион|покрытие.*доставк",
            "доставка",
            "регион/покрытие",
            LabelType::Barrier,
        ),
        // UI/настройки
        rule(
            r"(где .*включ(ить|ается)|не вижу .*включить)",
            "UI/настройки",
            "непонятный интерфейс",
            LabelType::Barrier,
        ),
        rule(
            r"не (вижу|понимаю).*включ(ить|ения)|настройк.*непонят",
            "UI/настройки",
            "непонятный интерфейс",
            LabelType::Barrier,
        ),
        // Продвижение
        rule(
            r"(ставк|бюджет|просмотр).*(не помогает|эффект тот же|не окуп)",
            "продвижение",
            "не окупается",
            LabelType::Barrier,
        ),
        rule(
            r"продвижен|реклама.*(мало запрос|не работает)",
            "продвижение",
            "не окупается",
            LabelType::Barrier,
        ),
        rule(
            r"дорог(о|ая)|не стоит своих денег|высокая стоимость",
            "продвижение",
            "высокая стоимость",
            LabelType::Barrier,
        ),
        // Поддержка
        rule(
            r"(писал|обращал).*(не реш|без результата|долго ждат)",
            "поддержка",
            "обращался — не помогло",
            LabelType::Signal,
        ),
        rule(
            r"поддержк.*(не отвеч|медленно|долго)",
            "поддержка",
            "обращался — не помогло",
            LabelType::Signal,
        ),
        // Цены
        rule(
            r"дорог(о|ая).*категор",
            "цены",
            "дорого для категории",
            LabelType::Barrier,
        ),
        rule(
            r"фиксированн.*цен",
            "цены",
            "фиксированная цена",
            LabelType::Barrier,
        ),
    ];

    // A pattern that fails to compile is skipped; the count assertion in
    // the tests below catches regressions in the built-in set.
    RuleSet::new(
        rules
            .into_iter()
            .filter_map(|r| match r {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!(error = %e, "skipping built-in rule that failed to compile");
                    None
                }
            })
            .collect(),
    )
}
