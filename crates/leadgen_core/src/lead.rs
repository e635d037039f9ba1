use std::sync::Arc;

/// One discovered business, as shown in the dashboard table.
///
/// Leads are values: a refresh produces new `Lead`s, nothing edits one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub company_name: String,
    pub url: String,
    pub category: Option<String>,
    /// PSI-style performance index, always within `0..=100`.
    pub performance_score: Option<u8>,
    /// Largest Contentful Paint in seconds.
    pub lcp_value: Option<f64>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub owner_email: Option<String>,
    pub uses_ads: Option<bool>,
}

impl Lead {
    pub fn new(company_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            url: url.into(),
            category: None,
            performance_score: None,
            lcp_value: None,
            location: None,
            phone_number: None,
            owner_email: None,
            uses_ads: None,
        }
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.performance_score = Some(score.min(100));
        self
    }

    pub fn with_lcp(mut self, seconds: f64) -> Self {
        self.lcp_value = Some(seconds);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Ordered, immutable collection of leads in server response order.
///
/// Cloning is cheap and shares the underlying slice; a refresh swaps the whole
/// set. Company names are expected to be unique but this is not enforced.
#[derive(Debug, Clone)]
pub struct LeadSet {
    leads: Arc<[Lead]>,
}

impl LeadSet {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads: Arc::from(leads),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn as_slice(&self) -> &[Lead] {
        &self.leads
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lead> {
        self.leads.iter()
    }

    /// First lead with the given company name, in server order.
    pub fn find(&self, company_name: &str) -> Option<&Lead> {
        self.leads
            .iter()
            .find(|lead| lead.company_name == company_name)
    }

    pub fn contains(&self, company_name: &str) -> bool {
        self.find(company_name).is_some()
    }

    /// True when both handles point at the same allocation.
    pub fn same_as(&self, other: &LeadSet) -> bool {
        Arc::ptr_eq(&self.leads, &other.leads)
    }
}

impl Default for LeadSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for LeadSet {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other) || self.leads[..] == other.leads[..]
    }
}

impl FromIterator<Lead> for LeadSet {
    fn from_iter<I: IntoIterator<Item = Lead>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LeadSet {
    type Item = &'a Lead;
    type IntoIter = std::slice::Iter<'a, Lead>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
