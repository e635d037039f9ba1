use crate::{classify, Lead};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutreachLanguage {
    English,
    Czech,
}

impl OutreachLanguage {
    /// US leads get English copy; every other market defaults to Czech.
    pub fn for_location(location: Option<&str>) -> Self {
        match location {
            Some(location) if location.trim().eq_ignore_ascii_case("usa") => {
                OutreachLanguage::English
            }
            _ => OutreachLanguage::Czech,
        }
    }
}

/// Acquisition email shown in the lead detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachDraft {
    pub language: OutreachLanguage,
    pub subject: String,
    pub body: String,
}

/// Draft the outreach email for a lead, or `None` when it is not eligible.
pub fn draft_outreach(lead: &Lead) -> Option<OutreachDraft> {
    if !classify(lead).email_eligible {
        return None;
    }
    let score = lead.performance_score?;
    let language = OutreachLanguage::for_location(lead.location.as_deref());

    let draft = match language {
        OutreachLanguage::English => english_draft(lead, score),
        OutreachLanguage::Czech => czech_draft(lead, score),
    };
    Some(draft)
}

fn english_draft(lead: &Lead, score: u8) -> OutreachDraft {
    let lcp_sentence = lead
        .lcp_value
        .map(|lcp| {
            format!(
                "I noticed a serious slowdown on mobile devices: the main content takes {lcp}s to appear. "
            )
        })
        .unwrap_or_default();

    let body = format!(
        "Hello,\n\n\
         while looking at companies in your field I came across your website {url}. \
         {lcp_sentence}Google currently rates its performance at only {score}/100, \
         which can push you below competitors with faster sites.\n\n\
         I have put together 3 quick fixes that would make a noticeable difference. \
         Happy to send them over or talk them through on a short call.\n\n\
         Best regards",
        url = lead.url,
    );

    OutreachDraft {
        language: OutreachLanguage::English,
        subject: format!("Website health of {}: issues found", lead.company_name),
        body,
    }
}

fn czech_draft(lead: &Lead, score: u8) -> OutreachDraft {
    let lcp_sentence = lead
        .lcp_value
        .map(|lcp| {
            format!(
                "Všiml jsem si výrazného zpomalení na mobilech: hlavní obsah se načítá {lcp} s. "
            )
        })
        .unwrap_or_default();

    let body = format!(
        "Dobrý den,\n\n\
         při procházení firem ve vašem oboru jsem narazil na váš web {url}. \
         {lcp_sentence}Google mu aktuálně dává skóre výkonu jen {score}/100, \
         což vás může odsouvat za rychlejší konkurenci.\n\n\
         Připravil jsem 3 rychlé tipy, které by pomohly hned. \
         Rád vám je pošlu nebo probereme po telefonu.\n\n\
         S pozdravem",
        url = lead.url,
    );

    OutreachDraft {
        language: OutreachLanguage::Czech,
        subject: format!("Technický stav webu {}: nalezené chyby", lead.company_name),
        body,
    }
}
