use rocket::{form::Form, response::content::RawHtml, Route, State};

use crate::{
    config::Config,
    error::{Error, Result},
    model::{vote::VoteEvent, voter::VoterId},
    queue::VoteQueue,
};

pub fn routes() -> Vec<Route> {
    routes![index, submit]
}

#[get("/")]
async fn index(_voter_id: VoterId, config: &State<Config>) -> RawHtml<String> {
    // The guard issues the voter cookie; a GET records nothing.
    RawHtml(render_page(config, None))
}

/// The submitted ballot: a single `vote` field holding the chosen label.
#[derive(Debug, FromForm)]
struct VoteForm {
    vote: String,
}

#[post("/", data = "<form>")]
async fn submit(
    voter_id: VoterId,
    form: Form<VoteForm>,
    config: &State<Config>,
    queue: &State<VoteQueue>,
) -> Result<RawHtml<String>> {
    let vote = form.into_inner().vote;
    if vote != config.option_a() && vote != config.option_b() {
        return Err(Error::UnknownOption(vote));
    }

    let event = VoteEvent::new(voter_id, vote);
    info!(
        "[{}] Vote received for {} from voter {}",
        event.timestamp,
        event.vote,
        event.voter_id.prefix()
    );
    queue.append(&event).await?;

    Ok(RawHtml(render_page(config, Some(&event.vote))))
}

/// Render the ballot page: two submit buttons, the host that answered, and
/// the choice just recorded if any.
fn render_page(config: &Config, vote: Option<&str>) -> String {
    let option_a = config.option_a();
    let option_b = config.option_b();
    let hostname = config.hostname();
    let result = match vote {
        Some(vote) => format!("<p id=\"result\">You voted for {vote}!</p>\n"),
        None => String::new(),
    };
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>{option_a} vs {option_b}</title></head>\n\
         <body>\n\
         <h1>{option_a} vs {option_b}!</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         <button type=\"submit\" name=\"vote\" value=\"{option_a}\">{option_a}</button>\n\
         <button type=\"submit\" name=\"vote\" value=\"{option_b}\">{option_b}</button>\n\
         </form>\n\
         {result}\
         <p id=\"hostname\">Processed by container ID {hostname}</p>\n\
         </body>\n\
         </html>\n"
    )
}
