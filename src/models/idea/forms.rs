use crate::errors::ValidationError;
use crate::models::organization::Organization;
use crate::validate::validate_required;

use super::types::{CommentForm, IdeaForm, NewComment, NewIdea};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 5000;
const AUTHOR_MAX: usize = 100;
const COMMENT_MAX: usize = 2000;

impl IdeaForm {
    /// Check every field and collect all messages before giving up.
    pub fn validate(&self) -> Result<NewIdea, ValidationError> {
        let mut errors = Vec::new();
        errors.extend(validate_required(&self.title, "Idea", TITLE_MAX));
        errors.extend(validate_required(&self.description, "Description", DESCRIPTION_MAX));
        errors.extend(validate_required(&self.author, "Your name", AUTHOR_MAX));

        let organization = if self.organization.trim().is_empty() {
            errors.push("Organization is required".to_string());
            None
        } else {
            match self.organization.parse::<Organization>() {
                Ok(org) => Some(org),
                Err(e) => {
                    errors.push(e.to_string());
                    None
                }
            }
        };

        match organization {
            Some(organization) if errors.is_empty() => Ok(NewIdea {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                author: self.author.trim().to_string(),
                organization,
            }),
            _ => Err(ValidationError(errors)),
        }
    }
}

impl CommentForm {
    pub fn validate(&self) -> Result<NewComment, ValidationError> {
        let mut errors = Vec::new();
        errors.extend(validate_required(&self.text, "Comment", COMMENT_MAX));
        errors.extend(validate_required(&self.author, "Your name", AUTHOR_MAX));
        if !errors.is_empty() {
            return Err(ValidationError(errors));
        }
        Ok(NewComment {
            text: self.text.trim().to_string(),
            author: self.author.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar_lights() -> IdeaForm {
        IdeaForm {
            title: "Solar lights".into(),
            description: "Street lights powered by panels".into(),
            author: "Asha".into(),
            organization: "Vrutti".into(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let mut form = solar_lights();
        form.title = "  Solar lights  ".into();
        let idea = form.validate().unwrap();
        assert_eq!(idea.title, "Solar lights");
        assert_eq!(idea.organization, Organization::Vrutti);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let form = IdeaForm::default();
        let err = form.validate().unwrap_err();
        assert_eq!(err.0.len(), 4);
        assert!(err.0.contains(&"Idea is required".to_string()));
        assert!(err.0.contains(&"Organization is required".to_string()));
    }

    #[test]
    fn unknown_organization_is_rejected() {
        let mut form = solar_lights();
        form.organization = "Acme".into();
        let err = form.validate().unwrap_err();
        assert_eq!(err.0, vec!["Unknown organization: Acme".to_string()]);
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut form = solar_lights();
        form.title = "x".repeat(TITLE_MAX + 1);
        assert!(form.validate().is_err());
    }

    #[test]
    fn blank_comment_is_rejected() {
        let form = CommentForm { text: "   ".into(), author: "Ravi".into(), csrf_token: String::new() };
        let err = form.validate().unwrap_err();
        assert_eq!(err.0, vec!["Comment is required".to_string()]);
    }
}
