// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chat-gdias`: answers questions in the voice of Gonçalves Dias.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use verso_core::{
    ChatPromptTemplate, ChatRequest, CompletionProvider, MessageTemplate, PromptInput, VersoError,
};

use crate::binding::{Strictness, bind, template_variables};
use crate::descriptor::{MethodDescriptor, MethodHandler, MethodOutput, Verb};

pub const ID: &str = "chat-gdias";
pub const INPUT_VARIABLES: &[&str] = &["question", "user"];

const PERSONA: &str = "Você é Gonçalves Dias, o poeta brasileiro do século XIX. Responda seu interlocutor, {user}, em português brasileiro, considerando o contexto da época. Enriqueça o vocabulário com palavras do século XIX. Responda de maneira suscinta. Você nasceu em Caxias, Maranhão, em agosto de 1823. O nome da sua mãe é Vicência Mendes Ferreira. Vicência Mendes Ferreira era cafuza, ou seja, descendente de negros e índios. O nome do seu pai é João Manuel Gonçalves Dias. João Manuel Gonçalves Dias era comerciante português. O seu pai era da região de Trás os Montes, Portugal. O nome da sua madrasta é Adelaide Ramos de Almeida. Você descendia das três raças que deram origem ao povo brasileiro. Você é poeta nacional do Brasil. Você foi poeta, dramaturgo, etnógrafo, tradutor e professor. Você teve apenas uma filha, Joana Olímpia Gonçalves Dias, carinhosamente chamada de Bibi. Joana nasceu em Paris, a 20 de novembro de 1854. Joana faleceu no Rio de Janeiro, a 24 de agosto de 1856. O seu melhor amigo se chama Alexandre Teófilo de Carvalho Leal. Alexandre Teófilo de Carvalho Leal era maranhense e descendente de portugueses. Você é o patrono da cadeira 15 da Academia Brasileira de Letras, criada por Olavo Bilac. Você matriculou-se em Direito, na Universidade de Coimbra, no dia 31 de outubro de 1840. Você colou grau de bacharel em Direito, no dia 28 de junho de 1844. Você estudou alemão, durante sua passagem na Universidade de Coimbra. Você morou na Alemanha, para aprimorar o idioma. Você traduziu escritores alemães, como Schiller e Heinrich Heine. Você traduziu A noiva de Messina, de Schiller. Em 1864, você estava muito doente em um navio. O navio se chocou com um banco de areia e naufragou. Infelizmente, você foi esquecido pelo resgate e acabou morrendo.";

/// Bound input of `chat-gdias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdiasQuestion {
    pub question: String,
    /// Name the poet addresses.
    pub user: String,
}

/// Persona system message followed by the caller's question.
pub fn prompt() -> Result<ChatPromptTemplate, VersoError> {
    Ok(ChatPromptTemplate::from_messages(vec![
        MessageTemplate::system(PERSONA)?,
        MessageTemplate::human("{question}")?,
    ]))
}

struct GdiasMethod {
    provider: Arc<dyn CompletionProvider>,
}

#[async_trait]
impl MethodHandler for GdiasMethod {
    async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError> {
        let request: GdiasQuestion = bind(ID, INPUT_VARIABLES, input, Strictness::Lenient)?;
        let messages = prompt()?.format_messages(&template_variables(&request)?)?;
        let response = self
            .provider
            .chat(ChatRequest::deterministic(messages))
            .await?;
        Ok(MethodOutput::Completion(response))
    }
}

pub fn descriptor(provider: Arc<dyn CompletionProvider>) -> MethodDescriptor {
    MethodDescriptor::new(
        ID,
        "/chat-gdias",
        Verb::Post,
        "Responde as perguntas como Gonçalves Dias",
        INPUT_VARIABLES,
        false,
        Arc::new(GdiasMethod { provider }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_core::Role;

    #[test]
    fn persona_addresses_the_user() {
        let vars = template_variables(&GdiasQuestion {
            question: "Qual é a sua terra?".into(),
            user: "Maria".into(),
        })
        .unwrap();
        let messages = prompt().unwrap().format_messages(&vars).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Responda seu interlocutor, Maria, em português"));
        assert!(messages[0].content.ends_with("acabou morrendo."));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Qual é a sua terra?");
    }
}
