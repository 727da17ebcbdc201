//! Fixed catalog of business categories and website sections offered to users.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BusinessCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WebsiteSection {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

const fn category(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
) -> BusinessCategory {
    BusinessCategory {
        id,
        name,
        icon,
        description,
    }
}

const fn section(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    required: bool,
) -> WebsiteSection {
    WebsiteSection {
        id,
        name,
        description,
        required,
    }
}

pub const BUSINESS_CATEGORIES: &[BusinessCategory] = &[
    category("restaurant", "Restaurant", "🍽️", "Food service and dining establishments"),
    category("salon", "Hair Salon", "💇‍♀️", "Beauty and personal care services"),
    category("retail", "Retail Store", "🛍️", "Product sales and shopping"),
    category("fitness", "Fitness Center", "💪", "Health and wellness facilities"),
    category("medical", "Medical Practice", "🏥", "Healthcare and medical services"),
    category("legal", "Law Firm", "⚖️", "Legal services and consultation"),
    category("real-estate", "Real Estate", "🏠", "Property sales and rentals"),
    category("automotive", "Auto Repair", "🔧", "Vehicle maintenance and repair"),
    category("education", "Education", "📚", "Learning and training services"),
    category("technology", "Tech Services", "💻", "IT and software services"),
    category("consulting", "Consulting", "📊", "Business consulting and advisory"),
    category("photography", "Photography", "📸", "Photo and video services"),
    category("cleaning", "Cleaning Services", "🧹", "Commercial and residential cleaning"),
    category("landscaping", "Landscaping", "🌱", "Garden and lawn care services"),
    category("other", "Other", "🏢", "General business services"),
];

pub const WEBSITE_SECTIONS: &[WebsiteSection] = &[
    section("hero", "Hero Section", "Main banner with business name and key message", true),
    section("about", "About Us", "Information about your business and story", true),
    section("services", "Services", "List of services or products you offer", true),
    section("contact", "Contact Information", "Phone, email, address, and business hours", true),
    section("testimonials", "Customer Testimonials", "Reviews and feedback from customers", false),
    section("gallery", "Photo Gallery", "Images showcasing your business", false),
    section("pricing", "Pricing", "Service packages and pricing information", false),
    section("team", "Our Team", "Meet the people behind your business", false),
    section("blog", "Blog/News", "Latest updates and industry insights", false),
    section("faq", "FAQ", "Frequently asked questions and answers", false),
];

pub fn find_category(id: &str) -> Option<&'static BusinessCategory> {
    BUSINESS_CATEGORIES.iter().find(|c| c.id == id)
}
