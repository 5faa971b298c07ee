// Prompt template for resume generation.

use crate::models::resume::ResumeDetails;

/// Resume prompt template.
/// Replace: {name}, {email}, {phone}, {skills}, {experience}, {education}
pub const RESUME_PROMPT_TEMPLATE: &str = "Create a professional resume based on the following details:

Name: {name}
Email: {email}
Phone: {phone}
Skills: {skills}
Experience: {experience}
Education: {education}

Format it properly for a professional resume.";

/// Fills the template with the form values, verbatim.
///
/// Substitution is a single left-to-right pass over the template, so a value
/// that itself contains `{email}` or similar is never expanded again.
pub fn build_resume_prompt(details: &ResumeDetails) -> String {
    let mut prompt = String::with_capacity(
        RESUME_PROMPT_TEMPLATE.len()
            + details
                .labelled_fields()
                .iter()
                .map(|(_, v)| v.len())
                .sum::<usize>(),
    );

    let mut rest = RESUME_PROMPT_TEMPLATE;
    while let Some(open) = rest.find('{') {
        prompt.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find('}') else {
            prompt.push_str(after);
            rest = "";
            break;
        };
        match placeholder_value(details, &after[1..close]) {
            Some(value) => prompt.push_str(value),
            None => prompt.push_str(&after[..=close]),
        }
        rest = &after[close + 1..];
    }
    prompt.push_str(rest);
    prompt
}

fn placeholder_value<'a>(details: &'a ResumeDetails, key: &str) -> Option<&'a str> {
    match key {
        "name" => Some(details.name.as_str()),
        "email" => Some(details.email.as_str()),
        "phone" => Some(details.phone.as_str()),
        "skills" => Some(details.skills.as_str()),
        "experience" => Some(details.experience.as_str()),
        "education" => Some(details.education.as_str()),
        _ => None,
    }
}
