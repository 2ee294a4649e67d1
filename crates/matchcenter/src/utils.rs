use crate::display::shape_rtl;
use crate::types::MatchRecord;

#[derive(Debug, PartialEq, Eq)]
pub struct MatchStats {
    /// Tournaments in order of first appearance, with their match counts.
    pub tournaments: Vec<(String, usize)>,
    pub total: usize,
}

impl MatchStats {
    pub fn from_matches(matches: &[MatchRecord]) -> MatchStats {
        let mut tournaments: Vec<(String, usize)> = Vec::new();
        for m in matches {
            match tournaments.iter_mut().find(|(name, _)| *name == m.tournament) {
                Some((_, count)) => *count += 1,
                None => tournaments.push((m.tournament.clone(), 1)),
            }
        }

        MatchStats {
            tournaments,
            total: matches.len(),
        }
    }

    /// Same summary as the `Display` impl, with tournament names shaped for
    /// right-to-left display.
    pub fn to_shaped_string(&self) -> String {
        let shaped = MatchStats {
            tournaments: self
                .tournaments
                .iter()
                .map(|(name, count)| (shape_rtl(name), *count))
                .collect(),
            total: self.total,
        };
        shaped.to_string()
    }
}

impl std::fmt::Display for MatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        for (name, count) in &self.tournaments {
            writeln!(f, "  {:>3}  {}", count, name)?;
        }
        writeln!(f, "  Total: {}", self.total)
    }
}
