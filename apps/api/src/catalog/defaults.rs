//! Embedded fallback course table, used when no catalog file is configured.

use super::{CourseCatalog, CourseEntry};

/// (skill, course name, url, platform)
const DEFAULT_COURSES: &[(&str, &str, &str, &str)] = &[
    (
        "Data preprocessing",
        "Data Science Foundations",
        "https://skillsbuild.org/data-science",
        "IBM SkillsBuild",
    ),
    (
        "Data pipelines",
        "ETL and Data Pipelines with Shell Airflow and Kafka",
        "https://www.coursera.org/learn/etl-and-data-pipelines-shell-airflow-kafka",
        "Coursera",
    ),
    (
        "Insights",
        "Data Visualization with Python",
        "https://www.coursera.org/learn/python-for-data-visualization",
        "Coursera",
    ),
    (
        "Machine Learning",
        "Machine Learning with Python",
        "https://www.coursera.org/learn/machine-learning-with-python",
        "Coursera",
    ),
    (
        "Cloud",
        "Introduction to Cloud Computing",
        "https://www.coursera.org/learn/introduction-to-cloud",
        "Coursera",
    ),
    (
        "Python",
        "Python for Everybody",
        "https://www.coursera.org/specializations/python",
        "Coursera",
    ),
    (
        "SQL",
        "SQL for Data Science",
        "https://www.coursera.org/learn/sql-for-data-science",
        "Coursera",
    ),
    (
        "Generative AI",
        "Introduction to Generative AI",
        "https://www.cloudskillsboost.google/course_templates/536",
        "Google Cloud",
    ),
    (
        "AWS",
        "AWS Fundamentals",
        "https://www.coursera.org/specializations/aws-fundamentals",
        "Coursera",
    ),
    (
        "Azure",
        "Microsoft Azure Fundamentals AZ-900",
        "https://learn.microsoft.com/en-us/credentials/certifications/azure-fundamentals/",
        "Microsoft",
    ),
    (
        "Docker",
        "Docker for Developers",
        "https://www.udemy.com/topic/docker/",
        "Udemy",
    ),
    (
        "Kubernetes",
        "Architecting with Google Kubernetes Engine",
        "https://www.coursera.org/specializations/architecting-with-google-kubernetes-engine",
        "Google Cloud",
    ),
    (
        "HTML",
        "Introduction to HTML5",
        "https://www.coursera.org/learn/html",
        "Coursera",
    ),
    (
        "CSS",
        "CSS3",
        "https://www.coursera.org/learn/intro-css",
        "Coursera",
    ),
    (
        "JavaScript",
        "JavaScript Algorithms and Data Structures",
        "https://www.freecodecamp.org/learn/javascript-algorithms-and-data-structures/",
        "freeCodeCamp",
    ),
    (
        "React",
        "Meta Front-End Developer Professional Certificate",
        "https://www.coursera.org/professional-certificates/meta-front-end-developer",
        "Coursera",
    ),
    (
        "Node.js",
        "Developing Cloud Applications with Node.js and React",
        "https://www.coursera.org/learn/cloud-applications-nodejs-react",
        "Coursera",
    ),
    (
        "Communication",
        "Effective Communication: Writing, Design, and Presentation",
        "https://www.coursera.org/specializations/effective-communication",
        "Coursera",
    ),
    (
        "Leadership",
        "Strategic Leadership and Management",
        "https://www.coursera.org/specializations/strategic-leadership",
        "Coursera",
    ),
    (
        "Project Management",
        "Google Project Management Professional Certificate",
        "https://www.coursera.org/professional-certificates/google-project-management",
        "Coursera",
    ),
    (
        "Cybersecurity",
        "Google Cybersecurity Professional Certificate",
        "https://www.coursera.org/professional-certificates/google-cybersecurity",
        "Coursera",
    ),
];

pub(super) fn default_catalog() -> CourseCatalog {
    CourseCatalog::from_entries(
        DEFAULT_COURSES
            .iter()
            .map(|(skill, course_name, url, platform)| CourseEntry {
                skill: (*skill).to_string(),
                course_name: (*course_name).to_string(),
                url: (*url).to_string(),
                platform: Some((*platform).to_string()),
            })
            .collect(),
    )
}
