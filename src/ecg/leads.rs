use crate::ecg::source::WaveformBuffer;

/// Standard 12-lead reading order.
pub const CLINICAL_LEAD_ORDER: [&str; 12] = [
    "I", "II", "III", "AVR", "AVL", "AVF", "V1", "V2", "V3", "V4", "V5", "V6",
];

/// Pick the entries of `data` whose label matches a canonical name
/// (case-insensitive) and return them in canonical order.
///
/// Labels without a canonical match are dropped, canonical names without a
/// matching label are skipped. A repeated label resolves to its first
/// occurrence, so the output never holds duplicates.
pub fn reorder<T: Clone>(
    canonical: &[&str],
    labels: &[String],
    data: &[T],
) -> (Vec<String>, Vec<T>) {
    let upper: Vec<String> = labels.iter().map(|l| l.to_uppercase()).collect();
    let mut names = Vec::new();
    let mut picked = Vec::new();
    for name in canonical {
        let Some(index) = upper.iter().position(|l| l == name) else {
            continue;
        };
        if let Some(item) = data.get(index) {
            names.push((*name).to_owned());
            picked.push(item.clone());
        }
    }
    (names, picked)
}

#[derive(Clone, Debug, PartialEq)]
pub struct RearrangedLead {
    pub name: String,
    pub sample_rate_hz: f64,
    pub samples: Vec<f64>,
}

/// Leads of one recording in clinical order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RearrangedLeadSet {
    pub leads: Vec<RearrangedLead>,
}

impl RearrangedLeadSet {
    pub fn len(&self) -> usize {
        self.leads.len()
    }
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
    pub fn names(&self) -> Vec<&str> {
        self.leads.iter().map(|l| l.name.as_str()).collect()
    }
}

pub fn rearrange(waveform: &WaveformBuffer) -> RearrangedLeadSet {
    let indices: Vec<usize> = (0..waveform.num_channels()).collect();
    let (names, picked) = reorder(&CLINICAL_LEAD_ORDER, &waveform.labels(), &indices);
    let dropped = waveform.num_channels() - picked.len();
    if dropped > 0 {
        log::warn!("{dropped} channel(s) have no clinical lead name and were skipped");
    }
    let leads = names
        .into_iter()
        .zip(picked)
        .map(|(name, index)| RearrangedLead {
            name,
            sample_rate_hz: waveform.channels[index].sample_rate,
            samples: waveform.buffer[index].clone(),
        })
        .collect();
    RearrangedLeadSet { leads }
}
