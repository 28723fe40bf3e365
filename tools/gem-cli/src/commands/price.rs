//! Price commands - decrypt, encode and seal prices.

use anyhow::{bail, Context as _, Result};
use gem_pricing::{parse_leading_float, render_number, seal_random, PriceTransform};
use serde_json::json;

use super::{PriceArgs, PriceCommand};
use crate::context::Context;

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    match args.command {
        PriceCommand::Decrypt {
            ciphertext,
            halve,
            reveal,
        } => decrypt(&ciphertext, halve, reveal, ctx),
        PriceCommand::Encode { number, halve } => encode(&number, halve, ctx),
        PriceCommand::Seal { plaintext } => seal(&plaintext, ctx),
    }
}

fn transform(halve: bool) -> PriceTransform {
    if halve {
        PriceTransform::Halve
    } else {
        PriceTransform::Identity
    }
}

fn decrypt(ciphertext: &str, halve: bool, reveal: bool, ctx: &Context) -> Result<()> {
    let codec = ctx.require_price_codec()?;
    if !codec.has_secret() {
        ctx.output.warn(&format!(
            "{} is not set; every price decrypts as unavailable",
            ctx.config.pricing.secret_env
        ));
    }

    let code = codec.display_code(ciphertext, transform(halve));
    let value = reveal.then(|| codec.decrypt(ciphertext));

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "code": code, "value": value }));
        return Ok(());
    }

    ctx.output.kv("Code", &code);
    if let Some(value) = value {
        ctx.output.kv("Value", &render_number(value));
    }
    Ok(())
}

fn encode(number: &str, halve: bool, ctx: &Context) -> Result<()> {
    let Some(value) = parse_leading_float(number) else {
        bail!("Not a number: {}", number);
    };
    let codec = ctx.require_price_codec()?;
    let code = codec.display_number(Some(value), transform(halve));

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "code": code }));
    } else {
        println!("{}", code);
    }
    Ok(())
}

fn seal(plaintext: &str, ctx: &Context) -> Result<()> {
    let var = &ctx.config.pricing.secret_env;
    let secret = std::env::var(var)
        .ok()
        .filter(|s| !s.is_empty())
        .with_context(|| format!("{} is not set", var))?;

    let sealed = seal_random(plaintext, &secret)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "ciphertext": sealed }));
    } else {
        println!("{}", sealed);
    }
    Ok(())
}
