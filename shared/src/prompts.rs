//! Static prompt catalog for horoscope document generation
//!
//! All text is Czech: the prompts instruct the model in the language the
//! final document is written in. The catalog is plain data; rendering and
//! dispatch happen in the pipeline.

use crate::types::HoroscopeVariant;

/// Persona and formatting instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = concat!(
    "Píšeš horoskop, který je inspirativní, podpůrný a má praktické rady. ",
    "Používáš přátelský, ale zároveň profesionální tón. Text generuj v češtině.",
    "Pokud budeš potřebovat použij standardní html značky pro formátování textu - např. ",
    "<br>; pro nový řádek, <strong>; pro tučný text, <em>; pro kurzívu, ",
    "<h3> a <h4>; pro nadpisy sekcí, <ul>; pro odrážky a podobně."
);

/// Per-run context prefix. The `{name}`, `{dob}`, `{astro_number}` and
/// `{zodiac}` placeholders are substituted once per run, then each section
/// prompt is appended to the rendered result.
pub const BASE_PROMPT_TEMPLATE: &str = concat!(
    "Na základě jména {name}, data narození {dob}, astrologického čísla {astro_number} ",
    "a znamení zvěrokruhu {zodiac}, vytvoř text v češtině.",
    "Pokud není specificky napsáno neopakuj datum narození a vyvaruj se oslovení na začátku, ",
    "tento výstup je jenom jednou z částí celého horoskopu.",
    "Vytvoř následující sekci:"
);

/// One generatable document section: stable key, display title for the
/// rendered document, and the section-specific instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionPrompt {
    pub key: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
}

const BASIC_SECTIONS: &[SectionPrompt] = &[
    SectionPrompt {
        key: "definition",
        title: "Definice znamení",
        prompt: concat!(
            "Začni s neformálním pozdravem 'Ahoj <jméno> ...' a uveď datum narození, ",
            "dále napiš krátkou a zajímavou definici znamení zvěrokruhu, které reprezentuje ",
            "v několika odstavcích. Zaměř se na klíčové vlastnosti a prvky."
        ),
    },
    SectionPrompt {
        key: "strengths",
        title: "Silné a slabé stránky",
        prompt: concat!(
            "Popiš kladné vlastnosti znamení a jejich dopad na okolí. Vysvětli, jak inspiruje ",
            "ostatní, čím vyniká v přátelství a partnerství a jaké má talenty (kreativita, ",
            "organizace, komunikace apod.).",
            " Uveď, jaké slabé stránky a problematické rysy znamení se mohou projevit. Popiš, ",
            "jak ovlivňují vztahy nebo profesní život. Nabídni způsoby, jak s těmito rysy ",
            "vědomě pracovat a zmírnit je."
        ),
    },
    SectionPrompt {
        key: "career",
        title: "Práce a kariéra",
        prompt: concat!(
            "Vysvětli, jak znamení přistupuje k profesnímu životu – zda touží po vedení, ",
            "stabilitě, tvořivosti nebo svobodě. Uveď konkrétní oblasti a profese, ve kterých ",
            "vyniká. Popiš jeho pracovní styl a motivace (např. touha po uznání, smysluplnosti, ",
            "odměnách). Přidej doporučení, jak může v kariéře dosahovat nejlepších výsledků ",
            "a udržet si spokojenost."
        ),
    },
    SectionPrompt {
        key: "love",
        title: "Vztahy a partnerství",
        prompt: concat!(
            "Napiš odstavec o milostných vztazích této osoby, včetně toho, s kým si nejlépe ",
            "rozumí a jaké jsou pro ni ve vztazích výzvy.",
            " Vysvětli, jak znamení prožívá lásku a vztahy. Popiš jeho očekávání od partnera, ",
            "dynamiku ve vztahu a nejvíce/nejméně kompatibilní znamení. Uveď, jaké vlastnosti ",
            "hledá v partnerovi."
        ),
    },
];

const PROFI_EXTRA_SECTIONS: &[SectionPrompt] = &[
    SectionPrompt {
        key: "health",
        title: "Zdraví a pohoda",
        prompt: concat!(
            "Uveď, jak znamení obvykle pečuje o své zdraví a pohodu. Popiš citlivé oblasti ",
            "těla a vysvětli, jaký vliv má jeho energie na fyzickou i psychickou stránku. ",
            "Navrhni doporučené aktivity, pohyb, způsoby relaxace a regenerace. Zahrň i tipy ",
            "na vyvážený životní styl a způsoby zvládání stresu."
        ),
    },
    SectionPrompt {
        key: "finance",
        title: "Finance",
        prompt: concat!(
            "Napiš odstavec s finančními doporučeními pro osobu v tomto znamení. ",
            "Jaké má předpoklady pro správu peněz a na co si dát pozor?"
        ),
    },
    SectionPrompt {
        key: "spirituality",
        title: "Duchovní rozvoj a životní motto",
        prompt: concat!(
            "Vytvoř originální životní motto, které vyjadřuje filozofii znamení a jeho přístup ",
            "k životu. Uveď, jak toto motto může inspirovat k sebereflexi, motivovat k dosažení ",
            "cílů a připomínat hodnoty, které jsou pro znamení nejdůležitější."
        ),
    },
    SectionPrompt {
        key: "tips",
        title: "Praktické tipy pro každodenní život",
        prompt: concat!(
            "Napiš praktické rady pro každodenní život znamení. Ukaž, jak může zlepšit své ",
            "vztahy, komunikaci, profesní dráhu a osobní rovnováhu. Navrhni konkrétní kroky ",
            "k sebereflexi a osobnímu rozvoji. Přidej tipy, jak vyvážit jeho silné a slabé ",
            "stránky pro harmonický život."
        ),
    },
    SectionPrompt {
        key: "personal_questions",
        title: "Odpovědi na osobní otázky",
        prompt: concat!(
            "Zodpověz následující otázky, které jsou specifické pro osobu v tomto znamení: ",
            "Měla bych jít do předčasného důchodu? Jaké hobby bych měla zkusit?"
        ),
    },
];

/// Sections generated for a variant, in catalog order. Profi is a strict
/// superset of Basic.
pub fn sections_for(variant: HoroscopeVariant) -> Vec<&'static SectionPrompt> {
    match variant {
        HoroscopeVariant::Basic => BASIC_SECTIONS.iter().collect(),
        HoroscopeVariant::Profi => BASIC_SECTIONS.iter().chain(PROFI_EXTRA_SECTIONS).collect(),
    }
}
