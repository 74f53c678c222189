//! Built-in content used when configuration supplies none.

/// Data-science topics the agent writes about out of the box.
pub const DEFAULT_TOPICS: &[&str] = &[
    "ETL (Extract, Transform, Load) Processes",
    "Data Streaming Technologies",
    "DevOps for Data Science (MLOps)",
    "Internet of Things (IoT) Data Analysis",
    "The aim of every business data analysis",
    "Building your thought process in every data analysis task",
    "Anomaly Detection in Data",
    "Open Source Data Science Tools",
    "Data Science Career Advice",
    "Writing Technical Documentation",
    "SQL Tips for Data Analysts",
    "Machine Learning Model Optimization",
    "Big Data Trends",
    "Most used shortcuts in Excel",
    "Data Security and Privacy",
    "Python Skills for Data Science",
    "Power BI and Tableau as first choice tools",
    "Feature Engineering in ML",
    "Python Libraries for Data Science",
    "Version Control for Data Projects (Git)",
    "Data Science Project Management",
];

/// Style prompts, each with a `{topic}` placeholder.
pub const DEFAULT_STYLES: &[&str] = &[
    "Share an insightful fact about {topic}. Keep it concise and engaging.",
    "Write a thought-provoking question about {topic} to spark discussion.",
    "Post a quick tip or hack related to {topic}.",
    "Create a short and witty take on {topic}.",
    "Write a motivational quote related to {topic}.",
    "Provide a little-known historical fact about {topic}.",
    "Break down a complex concept related to {topic} in simple terms.",
];

/// Lead-in phrases models like to prepend. Matched case-insensitively.
pub const DEFAULT_PREAMBLES: &[&str] = &[
    "Here's a tweet:",
    "Here is a tweet:",
    "Here's your tweet:",
    "Here is your tweet:",
    "Here's a quick tip:",
    "Here's",
    "Here is",
    "Tweet:",
    "Quick tip:",
    "Sure!",
    "Sure,",
    "Certainly!",
    "Absolutely!",
];

/// Tags appended at random when the text carries none.
pub const DEFAULT_HASHTAGS: &[&str] = &[
    "#DataScience",
    "#MachineLearning",
    "#Analytics",
    "#BigData",
    "#Python",
    "#SQL",
    "#AI",
];

/// Regular expressions for refusals, boilerplate and unrendered placeholders.
pub const DEFAULT_DENYLIST: &[&str] = &[
    r"(?i)^i (cannot|can't|can not|am unable|am not able)\b",
    r"(?i)^(i'm|i am) sorry\b",
    r"(?i)^as an ai\b",
    r"(?i)\blanguage model\b",
    r"\[[^\]]*\]",
    r"\{[^}]*\}",
];

/// Non-AI templates used when every provider fails.
pub const DEFAULT_FALLBACK_TEMPLATES: &[&str] = &[
    "Every expert in {topic} started as a beginner. Keep learning and keep building.",
    "{topic} rewards curiosity. What is one thing you learned about it this week?",
    "Quick reminder: getting good at {topic} is a marathon, not a sprint. Small daily steps add up.",
    "What is your favorite resource for learning {topic}? Share it below!",
    "The best way to improve at {topic}? Practice on real problems, then share what you learn.",
];
