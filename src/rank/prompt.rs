// src/rank/prompt.rs
use crate::ingest::types::PaperRecord;

/// Characters of each abstract shown to the model.
pub const SUMMARY_PREVIEW_CHARS: usize = 400;

/// One numbered candidate line block, e.g.
/// `3. **Title** (Source: NBER)\n   Abstract: ...\n   Link: ...`
pub fn candidate_entry(index: usize, paper: &PaperRecord) -> String {
    let abstract_preview: String = paper.summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    format!(
        "{index}. **{}** (Source: {})\n   Abstract: {}\n   Link: {}",
        paper.title, paper.source, abstract_preview, paper.link
    )
}

/// Full ranking prompt. `candidates` is used as given; capping happens upstream.
pub fn build_prompt(candidates: &[PaperRecord], research_interests: &str, max_papers: u32) -> String {
    let listing = candidates
        .iter()
        .enumerate()
        .map(|(i, p)| candidate_entry(i + 1, p))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert research assistant with deep knowledge of academic literature.

RESEARCHER'S PROFILE:
{research_interests}

YOUR TASK:
Carefully review the papers below and select the TOP {max_papers} most valuable papers for this researcher.
Be highly selective - only include papers that would genuinely advance their research.

PAPERS TO REVIEW:
{listing}

OUTPUT FORMAT:
For each selected paper, provide:

### [Paper Number]. Paper Title

**Source:** [Journal/Working Paper Series]

**Why this matters:** [2-3 sentences explaining the paper's relevance to the researcher's work. Be specific - reference their research questions, methods, or contexts. Explain what they can learn or adapt from this paper.]

**Key findings:** [2-3 sentences on the main empirical results, methodology, or theoretical contribution. Focus on actionable insights.]

**Link:** [Full URL]

---

CRITICAL INSTRUCTIONS:
- Quality over quantity: It's better to return 5 exceptional papers than 15 mediocre ones
- Be ruthless: Only include papers that directly advance their research agenda
- Prioritize papers with strong identification strategies and novel contributions
- Skip papers that are tangentially related or merely descriptive
- For each paper, think: "Would I email this to them if I were their research assistant?"
- Order papers by relevance (most relevant first)
- If fewer than {max_papers} papers meet the high bar, that's okay - only return the truly valuable ones

Begin your response with a brief 1-sentence summary of the overall quality and themes of this week's papers, then list the selected papers.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, summary: &str) -> PaperRecord {
        PaperRecord {
            title: title.into(),
            summary: summary.into(),
            link: format!("https://ex.org/{title}"),
            source: "NBER".into(),
        }
    }

    #[test]
    fn entry_layout_and_abstract_cut() {
        let long = "é".repeat(500);
        let e = candidate_entry(7, &paper("T", &long));
        assert!(e.starts_with("7. **T** (Source: NBER)\n   Abstract: "));
        assert!(e.ends_with("\n   Link: https://ex.org/T"));
        assert_eq!(e.matches('é').count(), SUMMARY_PREVIEW_CHARS);
    }

    #[test]
    fn prompt_carries_profile_listing_and_count() {
        let p = build_prompt(
            &[paper("A", "x"), paper("B", "y")],
            "I study minimum wages.",
            4,
        );
        assert!(p.contains("RESEARCHER'S PROFILE:\nI study minimum wages.\n"));
        assert!(p.contains("select the TOP 4 most valuable papers"));
        assert!(p.contains("1. **A** (Source: NBER)"));
        assert!(p.contains("\n2. **B** (Source: NBER)"));
        assert!(p.contains("**Why this matters:**"));
        assert!(p.contains("**Key findings:**"));
        assert!(p.contains("If fewer than 4 papers meet the high bar"));
    }
}
