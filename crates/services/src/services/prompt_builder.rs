//! Builds the website-generation prompt from a business profile.

use db::models::business::{BusinessData, BusinessHours};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Caller-supplied knobs for one generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Only rebuild these sections
    pub regenerate_sections: Option<Vec<String>>,
    /// Extra instructions that take precedence over the category guidance
    pub custom_prompt: Option<String>,
    pub temperature: Option<f32>,
}

impl GenerationOptions {
    pub fn sections_to_regenerate(&self) -> Option<&[String]> {
        self.regenerate_sections
            .as_deref()
            .filter(|sections| !sections.is_empty())
    }

    pub fn custom_instructions(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Visual and tone guidance for a business category.
///
/// Unknown categories get the generic block.
pub fn category_guidelines(category: &str) -> &'static str {
    match category {
        "restaurant" => {
            "- Colors: Warm, inviting colors (oranges, reds, browns, golds)
- Typography: Serif headlines, readable body text
- Imagery: Food photos, atmosphere, ambiance
- Vibe: Appetite-appealing, welcoming, cozy
- Sections: Hero with food image, menu highlights, reviews, hours/location
- Layout: Clean, food-focused, easy navigation"
        }
        "salon" => {
            "- Colors: Elegant, sophisticated (blacks, whites, golds, pastels)
- Typography: Modern, clean, professional
- Imagery: Before/after photos, styling work, professional shots
- Vibe: Premium, trusted, relaxing, luxurious
- Sections: Gallery of work, services, testimonials, booking CTA
- Layout: Clean, professional, showcase-focused"
        }
        "retail" => {
            "- Colors: Modern, vibrant, brand-focused
- Typography: Bold, eye-catching, modern
- Imagery: Products, lifestyle, brand imagery
- Vibe: Shopping-friendly, discoverable, trendy
- Sections: Product showcase, about, promotions, contact
- Layout: Product-focused, easy browsing, clear CTAs"
        }
        "fitness" => {
            "- Colors: Energetic, motivating (blues, greens, oranges)
- Typography: Bold, strong, motivational
- Imagery: Workouts, equipment, healthy lifestyle
- Vibe: Energetic, motivating, professional
- Sections: Classes, trainers, facilities, membership
- Layout: Action-oriented, clear schedules, strong CTAs"
        }
        "medical" => {
            "- Colors: Clean, trustworthy (blues, whites, greens)
- Typography: Professional, readable, calming
- Imagery: Clean facilities, professional staff
- Vibe: Trustworthy, professional, caring
- Sections: Services, staff, location, appointments
- Layout: Clean, professional, easy to navigate"
        }
        _ => {
            "- Colors: Professional, modern, clean
- Typography: Clear, readable, professional
- Imagery: Professional, relevant to business
- Vibe: Professional, trustworthy, modern
- Sections: About, services, contact, testimonials
- Layout: Clean, professional, easy navigation"
        }
    }
}

/// One line per weekday, Monday first: `"<Day>: Closed"` or
/// `"<Day>: <open> - <close>"`.
pub fn format_business_hours(hours: &BusinessHours) -> String {
    hours
        .days()
        .iter()
        .map(|(day, day_hours)| {
            if !day_hours.is_open {
                return format!("{day}: Closed");
            }
            match (day_hours.open_time.as_deref(), day_hours.close_time.as_deref()) {
                (Some(open), Some(close)) => format!("{day}: {open} - {close}"),
                // open without times; say so rather than inventing hours
                _ => format!("{day}: Open (hours not specified)"),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full generation prompt
pub fn build_prompt(business: &BusinessData, options: &GenerationOptions) -> String {
    let category = &business.category;
    let sections = business.sections.join(", ");
    let sections_json =
        serde_json::to_string(&business.sections).unwrap_or_else(|_| "[]".to_string());

    let mut prompt = format!(
        r#"
# Website Generation Task

You are an expert web designer creating a professional, unique website for a {category} business.

## Business Information
- **Name:** {name}
- **Category:** {category}
- **Description:** {description}
- **Phone:** {phone}
- **Email:** {email}
- **Address:** {address}
- **Website:** {website}
- **Images:** {image_count} images provided
- **Sections:** {sections}

## Business Hours
{hours}

## Design Guidelines for {category}
{guidelines}

## Requirements
1. Generate a complete, professional website using HTML, CSS, and minimal JavaScript
2. Use ONLY Tailwind CSS classes for styling (no custom CSS)
3. Make it mobile-first and fully responsive
4. Include all requested sections: {sections}
5. Use modern, clean design principles
6. Ensure accessibility standards (ARIA labels, semantic HTML)
7. Include proper meta tags and SEO optimization
8. Make it unique and not template-like
"#,
        name = business.name,
        description = business.description,
        phone = business.phone,
        email = business.email,
        address = business.address,
        website = business.website().unwrap_or("Not provided"),
        image_count = business.images.len(),
        hours = format_business_hours(&business.hours),
        guidelines = category_guidelines(category),
    );

    if let Some(targets) = options.sections_to_regenerate() {
        prompt.push_str(&format!(
            r#"
## Sections to Regenerate
Rebuild only these sections with a fresh design, keeping the rest of the page consistent: {}
"#,
            targets.join(", ")
        ));
    }

    if let Some(custom) = options.custom_instructions() {
        prompt.push_str(&format!(
            r#"
## Additional Instructions
These instructions take precedence over the design guidelines above:
{custom}
"#
        ));
    }

    prompt.push_str(&format!(
        r#"
## Output Format
Return your response as a JSON object with this exact structure:
{{
  "html": "complete HTML document with <!DOCTYPE html>",
  "css": "any additional CSS (minimal, mostly Tailwind)",
  "javascript": "minimal JavaScript for interactivity",
  "metadata": {{
    "category": "{category}",
    "imageUrls": [],
    "sections": {sections_json}
  }}
}}

## Important Notes
- The HTML must be a complete, valid document
- Use Tailwind CSS classes for all styling
- Include proper semantic HTML structure
- Make it visually appealing and professional
- Ensure it works on mobile and desktop
- Include contact information and business hours
- Make it unique to this specific business

Generate the website now:
"#
    ));

    prompt
}
