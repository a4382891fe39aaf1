use std::fmt::Write as _;

use surveymonkey_core::models::{QuestionKind, Survey, SurveySummary};
use surveymonkey_core::results::{ResultSummary, SurveyResults};

pub const SITE_NAME: &str = "Survey Monkey";

pub const SITE_CSS: &str = include_str!("assets/site.css");
pub const CREATE_JS: &str = include_str!("assets/create.js");
pub const ANSWER_JS: &str = include_str!("assets/answer.js");

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str, script: Option<&str>) -> String {
    let script_tag = script
        .map(|src| format!("<script src=\"{src}\" defer></script>"))
        .unwrap_or_default();
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | {SITE_NAME}</title>\n\
         <link rel=\"stylesheet\" href=\"/assets/site.css\">\n{script_tag}\n</head>\n<body>\n\
         <header><a class=\"brand\" href=\"/\">{SITE_NAME}</a> <a href=\"/home\">Create a survey</a></header>\n\
         <main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

pub fn message_page(heading: &str, message: &str) -> String {
    layout(
        heading,
        &format!(
            "<h1>{}</h1>\n<p class=\"message\">{}</p>",
            escape_html(heading),
            escape_html(message)
        ),
        None,
    )
}

pub fn available_surveys_page(surveys: &[SurveySummary]) -> String {
    let mut body = format!("<h1>{SITE_NAME}</h1>\n<h2>Available surveys</h2>\n");
    if surveys.is_empty() {
        body.push_str("<p>No surveys yet. <a href=\"/home\">Create a new survey</a>.</p>\n");
    } else {
        body.push_str("<ul class=\"surveys\">\n");
        for survey in surveys {
            let code = escape_html(&survey.survey_code);
            let _ = writeln!(
                body,
                "<li><a href=\"/survey/{code}\">{title}</a> <code>{code}</code> \
                 <span class=\"meta\">{questions} questions, {responses} responses</span></li>",
                title = escape_html(&survey.title),
                questions = survey.question_count,
                responses = survey.response_count,
            );
        }
        body.push_str("</ul>\n");
    }
    layout(SITE_NAME, &body, None)
}

pub fn home_page() -> String {
    let body = "<h1>Create a new survey</h1>\n\
        <form method=\"get\" action=\"/surveyQuestions\">\n\
        <label>Survey title <input name=\"title\" required></label>\n\
        <button type=\"submit\">Start</button>\n</form>\n\
        <h2>Manage your survey</h2>\n\
        <form method=\"post\" action=\"/surveyResults\">\n\
        <label>Survey code <input name=\"surveyCode\" required></label>\n\
        <label>Password <input name=\"surveyPassword\" type=\"password\" required></label>\n\
        <button type=\"submit\">View results</button>\n\
        <button type=\"submit\" formaction=\"/deleteSurvey\">Delete survey</button>\n</form>";
    layout("Create a new survey", body, None)
}

pub fn survey_questions_page(title: &str) -> String {
    let title = escape_html(title);
    let body = format!(
        "<h1>Create your survey!</h1>\n\
         <form id=\"create-survey\">\n\
         <label>Title <input name=\"title\" value=\"{title}\" required></label>\n\
         <label>Owner password <input name=\"password\" type=\"password\" required></label>\n\
         <ol id=\"questions\"></ol>\n\
         <div class=\"actions\">\n\
         <button type=\"button\" data-add=\"OPEN_ENDED\">Add open-ended question</button>\n\
         <button type=\"button\" data-add=\"HISTOGRAM\">Add numeric range question</button>\n\
         <button type=\"button\" data-add=\"OPTION\">Add multiple-choice question</button>\n\
         </div>\n\
         <button type=\"submit\">Create survey</button>\n</form>\n\
         <p id=\"create-result\" class=\"message\"></p>"
    );
    layout("Create your survey!", &body, Some("/assets/create.js"))
}

pub fn survey_page(survey: &Survey) -> String {
    let mut body = format!(
        "<h1>{title}</h1>\n<form id=\"answer-survey\" data-survey-code=\"{code}\">\n",
        title = escape_html(survey.title()),
        code = escape_html(survey.survey_code()),
    );
    for pair in survey.questions() {
        let id = escape_html(&pair.question.id);
        let _ = write!(
            body,
            "<fieldset class=\"question\" data-question-id=\"{id}\" data-kind=\"{kind}\">\n\
             <legend class=\"prompt\">{prompt}</legend>\n",
            kind = pair.question.kind.label(),
            prompt = escape_html(&pair.question.prompt),
        );
        match &pair.question.kind {
            QuestionKind::OpenEnded => {
                let _ = writeln!(body, "<textarea name=\"{id}\" rows=\"3\"></textarea>");
            }
            QuestionKind::Histogram {
                min_value,
                max_value,
                step_size,
            } => {
                let _ = writeln!(
                    body,
                    "<input type=\"number\" name=\"{id}\" min=\"{min_value}\" max=\"{max_value}\" step=\"{step_size}\">"
                );
            }
            QuestionKind::MultipleChoice { choices } => {
                for choice in choices {
                    let choice = escape_html(choice);
                    let _ = writeln!(
                        body,
                        "<label><input type=\"radio\" name=\"{id}\" value=\"{choice}\"> {choice}</label>"
                    );
                }
            }
        }
        body.push_str("</fieldset>\n");
    }
    body.push_str("<button type=\"submit\">Submit</button>\n</form>\n<p id=\"answer-error\" class=\"message\"></p>");
    layout(survey.title(), &body, Some("/assets/answer.js"))
}

pub fn submission_page() -> String {
    message_page(
        "Thank you",
        "You have successfully submitted your survey. Thank you for taking part!",
    )
}

pub fn results_page(results: &SurveyResults) -> String {
    let code = escape_html(&results.survey_code);
    let visibility = if results.is_public { "public" } else { "private" };
    let mut body = format!(
        "<h1>{title}</h1>\n<p>Survey code <code>{code}</code>, results are {visibility}, \
         {responses} responses.</p>\n",
        title = escape_html(&results.title),
        responses = results.response_count,
    );
    for question in &results.questions {
        let _ = write!(
            body,
            "<section class=\"result\">\n<h2 class=\"prompt\">{}</h2>\n<p class=\"meta\">{} answers</p>\n",
            escape_html(&question.prompt),
            question.answer_count
        );
        match &question.summary {
            ResultSummary::OpenEnded { answers } => {
                body.push_str("<ul>\n");
                for answer in answers {
                    let _ = writeln!(body, "<li>{}</li>", escape_html(answer));
                }
                body.push_str("</ul>\n");
            }
            ResultSummary::Histogram { bins, invalid } => {
                body.push_str("<table>\n<tr><th>Range</th><th>Count</th></tr>\n");
                for bin in bins {
                    let _ = writeln!(
                        body,
                        "<tr><td>{} to {}</td><td>{}</td></tr>",
                        bin.lower, bin.upper, bin.count
                    );
                }
                body.push_str("</table>\n");
                if *invalid > 0 {
                    let _ = writeln!(body, "<p class=\"meta\">{invalid} answers outside the range</p>");
                }
            }
            ResultSummary::MultipleChoice { tallies, other } => {
                body.push_str("<table>\n<tr><th>Choice</th><th>Count</th></tr>\n");
                for tally in tallies {
                    let _ = writeln!(
                        body,
                        "<tr><td>{}</td><td>{}</td></tr>",
                        escape_html(&tally.choice),
                        tally.count
                    );
                }
                body.push_str("</table>\n");
                if *other > 0 {
                    let _ = writeln!(body, "<p class=\"meta\">{other} other answers</p>");
                }
            }
        }
        body.push_str("</section>\n");
    }
    if results.is_public {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/private/{code}\">\n\
             <label>Password <input name=\"passwordPrivate\" type=\"password\" required></label>\n\
             <button type=\"submit\">Make results private</button>\n</form>\n"
        );
    } else {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/public/{code}\">\n\
             <label>Password <input name=\"password\" type=\"password\" required></label>\n\
             <button type=\"submit\">Make results public</button>\n</form>\n"
        );
    }
    layout(&results.title, &body, None)
}

pub fn public_link_page(survey: &Survey) -> String {
    let code = escape_html(survey.survey_code());
    let body = format!(
        "<h1>{title}</h1>\n<p class=\"message\">Here is your public survey results link: \
         <a href=\"/survey/results/{code}\">/survey/results/{code}</a></p>",
        title = escape_html(survey.title()),
    );
    layout(survey.title(), &body, None)
}

pub fn made_private_page(survey: &Survey) -> String {
    let body = format!(
        "<h1>{title}</h1>\n<p class=\"message\">Survey Results successfully made private.</p>",
        title = escape_html(survey.title()),
    );
    layout(survey.title(), &body, None)
}

pub fn deleted_page() -> String {
    message_page("Survey deleted", "Successfully deleted your survey!")
}
