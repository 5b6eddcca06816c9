//! Everything the page says. Static data only.

pub const NAME: &str = "OMA";
pub const TAGLINE: &str = "Vibe Coder | AI-Powered Developer | Prompt Engineer";
pub const LOCATION: &str = "Remote";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

pub const X_LINK: Link = Link {
    label: "omabyte",
    url: "http://x.com/omabyte",
};

pub const GITHUB_LINK: Link = Link {
    label: "imomao",
    url: "https://github.com/imomao",
};

pub const ABOUT_TITLE: &str = "About Me";
pub const ABOUT: &str = "i’m a vibe coder, a new breed of developer fluent in natural language prompts, fluent logic, and AI-augmented development. i specialize in using LLMs like GPT-4, Gemini, and Claude to generate, refine, and debug clean, scalable code across frontend, backend, and creative automation stacks. i don’t just write code, i shape intention into output. although i mostly vibe code to solve personal problems, i am always open to collaborating.";

pub const SKILLS_TITLE: &str = "Skills";
pub const SKILLS: &[&str] = &[
    "Prompt Engineering",
    "Rapid Prototyping",
    "AI Code Review",
    "React & Next.js",
];

pub const STACK_TITLE: &str = "Using";
/// Tool categories, in display order
pub const STACK: &[(&str, &[&str])] = &[
    ("Languages", &["JavaScript", "TypeScript", "Python"]),
    ("Frameworks", &["React", "Next.js"]),
    ("AI Tools", &["GPT-4", "Gemini", "Claude"]),
    ("Cloud", &["Firebase", "Supabase", "Vercel", "Netlify"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub stack: &'static str,
    pub link: &'static str,
}

pub const PROJECTS_TITLE: &str = "Vibe coded";
pub const PROJECTS: &[Project] = &[
    Project {
        title: "Wrd",
        subtitle: "The Bible, for the new gen",
        description: "Reimagines the Bible by translating its text into authentic Gen-Z slang, making it more relatable and less intimidating.",
        stack: "Gemini 2.5, HTML, CSS, JavaScript",
        link: "https://wrdverse.netlify.app",
    },
    Project {
        title: "Spark",
        subtitle: "AI-powered brainstorming partner",
        description: "It acts as both a creative collaborator to generate new ideas and a critical debater to stress-test them, helping you refine your vision from every angle.",
        stack: "Gemini 2.5, HTML, CSS, JavaScript, React",
        link: "https://sparkky.xyz",
    },
    Project {
        title: "BetterPrompt",
        subtitle: "Smart prompt generator",
        description: "You give it a simple idea in plain English, and it automatically writes expert-level, detailed prompts for the best AI models, so you get much better results.",
        stack: "Gemini 2.5, HTML, CSS, JavaScript",
        link: "https://betterprompts.netlify.app",
    },
    Project {
        title: "Remnat",
        subtitle: "Modern digital companion for natural wellness",
        description: "A quick and trustworthy guide, offering simple, verified home remedies for everyday ailments, all neatly organized so you can find what you need right away.",
        stack: "Gemini 2.5, React, JSX, Tailwind CSS",
        link: "https://remnat.online",
    },
    Project {
        title: "DupL1k8",
        subtitle: "Efficient client-side utility for cleaning text",
        description: "This lets you paste any list or block of text and instantly removes all the duplicate lines, giving you a clean list.",
        stack: "Gemini 2.5, HTML, CSS, JavaScript",
        link: "https://dupl1k8.netlify.app",
    },
    Project {
        title: "Stelo",
        subtitle: "Movie suggester",
        description: "A simple and fun movie discovery app that suggests random films based on your favorite genre.",
        stack: "Gemini 2.5, JSX",
        link: "https://stelo.online",
    },
];

pub const PHILOSOPHY_HEADLINE: &str = "This is Vibe Coding.";
pub const PHILOSOPHY_LINES: &[&str] = &[
    "Where creation becomes conversation.",
    "A prompt well-written is a product half-built. The old grind of line-by-line? That’s legacy energy.",
];
pub const PHILOSOPHY_EMPHASIS: &str = "Natural language + AI = creative dev energy.";
pub const PHILOSOPHY_FOOTNOTE: &str = "and yes, this site was vibe-coded as well";

pub const FOOTER_TITLE: &str = "Let’s Build";
pub const FOOTER_TEXT: &str = "open to collabs.";
pub const COPYRIGHT: &str = "© 2025 OMA. All vibes reserved.";

/// Glyphs standing in for the section icons
pub mod icons {
    pub const USER: &str = "◉";
    pub const CPU: &str = "▣";
    pub const CODE: &str = "⟨⟩";
    pub const CROSSHAIR: &str = "⊕";
    pub const MESSAGE: &str = "◈";
    pub const PIN: &str = "⌖";
    pub const X: &str = "X";
    pub const GITHUB: &str = "⌥";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_shape() {
        assert_eq!(SKILLS.len(), 4);
        assert_eq!(PROJECTS.len(), 6);
        let categories: Vec<&str> = STACK.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, ["Languages", "Frameworks", "AI Tools", "Cloud"]);
        assert!(PROJECTS.iter().all(|p| p.link.starts_with("http")));
    }
}
