//! S1 PromptBuild: assembles the system instruction and task prompt.
//! Pure function of the context — deterministic, no I/O.

use crate::context::ExecutionContext;

fn system_instruction(ctx: &ExecutionContext) -> String {
    let mut lines = vec![
        "You are writing a long-form SEO/AEO article. Respond with a structured document \
         matching the ArticleDocument schema exactly.".to_string(),
        "HTML rules: wrap every paragraph in <p>...</p>; never use <br><br> for paragraph \
         breaks; do not use em-dashes (\u{2014}) or en-dashes (\u{2013}).".to_string(),
        "Citation rules: inline citation markers use the form [N]; list every source in \
         Sources as \"[N]: Title \u{2013} URL\"; every body citation marker must have a \
         corresponding Sources entry.".to_string(),
        "Section variety: at least 2 long sections (700-900 words), 2-3 medium (400-600), \
         2-3 short (200-300); no more than 2 sections may share the same structural pattern.".to_string(),
        "Never mention competitor names.".to_string(),
    ];
    if let Some(tone) = &ctx.job_config.tone {
        lines.push(format!("Tone: {tone}."));
    }
    lines.join("\n")
}

fn task_prompt(ctx: &ExecutionContext) -> String {
    let mut parts = vec![format!("Keyword: {}", ctx.job_config.keyword)];
    parts.push(format!("Language: {}", ctx.job_config.language));
    parts.push(format!("Country: {}", ctx.job_config.country));

    if let Some(company) = &ctx.company_data {
        parts.push(format!("Company: {}", company.name));
        if let Some(audience) = &company.audience {
            parts.push(format!("Audience: {audience}"));
        }
        if !company.pain_points.is_empty() {
            parts.push(format!("Pain points: {}", company.pain_points.join(", ")));
        }
        if !company.value_propositions.is_empty() {
            parts.push(format!(
                "Value propositions: {}",
                company.value_propositions.join(", ")
            ));
        }
    }

    if let Some(extra) = &ctx.job_config.extra_instructions {
        parts.push(format!("Additional instructions: {extra}"));
    }

    parts.push(format!(
        "Target word count: {}-{} words.",
        ctx.job_config.word_count_min, ctx.job_config.word_count_max
    ));

    parts.join("\n")
}

pub fn run(mut ctx: ExecutionContext) -> ExecutionContext {
    let prompt = format!("{}\n\n{}", system_instruction(&ctx), task_prompt(&ctx));
    ctx.prompt = prompt;
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CompanyData, JobConfig};

    fn base_context() -> ExecutionContext {
        ExecutionContext::new(JobConfig {
            keyword: "cloud security best practices".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            tone: Some("professional".to_string()),
            extra_instructions: None,
            word_count_min: 2500,
            word_count_max: 4000,
            flags: Default::default(),
        })
    }

    #[test]
    fn prompt_includes_keyword_and_word_count_target() {
        let ctx = run(base_context());
        assert!(ctx.prompt.contains("cloud security best practices"));
        assert!(ctx.prompt.contains("2500-4000"));
    }

    #[test]
    fn prompt_includes_company_profile_when_present() {
        let mut ctx = base_context();
        ctx.company_data = Some(CompanyData {
            name: "Acme".to_string(),
            ..Default::default()
        });
        let ctx = run(ctx);
        assert!(ctx.prompt.contains("Acme"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let ctx = base_context();
        let first = run(ctx.clone());
        let second = run(ctx);
        assert_eq!(first.prompt, second.prompt);
    }
}
