// Copyright (C) 2020-2026 Andy Kurnia.

#![allow(dead_code)]

use kanagram::{alphabet, anagram, lexport};

pub static WORDS: &str = "\
AA\nAB\nAD\nAE\nAG\nAH\nAI\nAL\nAM\nAN\nAR\nAS\nAT\nAW\nAX\nAY\n\
BA\nBE\nBI\nBO\nBY\nDA\nDE\nDI\nDO\nED\nEF\nEH\nEL\nEM\nEN\nER\nES\nEX\n\
FA\nGI\nGO\nHA\nHE\nHI\nHM\nHO\nID\nIF\nIN\nIS\nIT\nJO\nKA\nKI\nLA\nLI\nLO\n\
MA\nME\nMI\nMO\nMU\nMY\nNA\nNE\nNO\nNU\nOD\nOE\nOF\nOH\nOI\nOM\nON\nOP\nOR\n\
OS\nOW\nOX\nOY\nPA\nPE\nPI\nPO\nQI\nRE\nSH\nSI\nSO\nTA\nTI\nTO\nUH\nUM\nUN\n\
UP\nUS\nUT\nWE\nWO\nXI\nXU\nYA\nYE\nYO\nZA\n\
ACE\nACT\nADD\nAGE\nAGO\nAID\nAIL\nAIM\nAIR\nALE\nAND\nANT\nANY\nAPE\nARC\n\
ARE\nARM\nART\nASH\nATE\nAWE\nAXE\nBAD\nBAG\nBAN\nBAR\nBAT\nBED\nBEE\nBET\n\
BID\nBIG\nBIN\nBIT\nBOA\nBOG\nBOX\nBOY\nBUD\nBUG\nBUN\nBUS\nBUT\nBUY\nCAB\n\
CAN\nCAP\nCAR\nCAT\nCOD\nCOG\nCOT\nCOW\nCRY\nCUB\nCUP\nCUT\nDAB\nDAM\nDEN\n\
DEW\nDIE\nDIG\nDIM\nDIN\nDIP\nDOE\nDOG\nDON\nDOT\nDRY\nDUE\nDUG\nEAR\nEAT\n\
EEL\nEGG\nELF\nELM\nEMU\nEND\nERA\nEVE\nEWE\nEYE\nFAN\nFAR\nFAT\nFED\nFEE\n\
FEW\nFIG\nFIN\nFIR\nFIT\nFIX\nFLY\nFOE\nFOG\nFOR\nFOX\nFRY\nFUN\nFUR\nGAP\n\
GAS\nGEL\nGEM\nGET\nGIN\nGNU\nGOD\nGOT\nGUM\nGUN\nGUT\nGUY\nHAD\nHAM\nHAS\n\
HAT\nHAY\nHEN\nHER\nHEW\nHID\nHIM\nHIP\nHIS\nHIT\nHOE\nHOG\nHOP\nHOT\nHOW\n\
HUB\nHUE\nHUG\nHUM\nHUT\nICE\nICY\nILL\nINK\nINN\nION\nIRE\nIRK\nITS\nIVY\n\
JAB\nJAM\nJAR\nJAW\nJAY\nJET\nJIG\nJOB\nJOG\nJOT\nJOY\nJUG\nKEG\nKEY\nKID\n\
KIN\nKIT\nLAB\nLAD\nLAG\nLAP\nLAW\nLAY\nLED\nLEG\nLET\nLID\nLIE\nLIP\nLIT\n\
LOG\nLOT\nLOW\nMAD\nMAN\nMAP\nMAT\nMAY\nMEN\nMET\nMIX\nMOB\nMOM\nMOP\nMUD\n\
MUG\nNAB\nNAG\nNAP\nNET\nNEW\nNIB\nNIL\nNIT\nNOD\nNOR\nNOT\nNOW\nNUN\nNUT\n\
OAK\nOAR\nOAT\nODD\nODE\nOFF\nOFT\nOIL\nOLD\nONE\nOPT\nORB\nORE\nOUR\nOUT\n\
OWE\nOWL\nOWN\nPAD\nPAL\nPAN\nPAT\nPAW\nPAY\nPEA\nPEG\nPEN\nPET\nPIE\nPIG\n\
PIN\nPIT\nPLY\nPOD\nPOT\nPRY\nPUB\nPUN\nPUP\nPUT\nQAT\nRAG\nRAM\nRAN\nRAP\n\
RAT\nRAW\nRAY\nRED\nRIB\nRID\nRIG\nRIM\nRIP\nROB\nROD\nROE\nROT\nROW\nRUB\n\
RUG\nRUM\nRUN\nRUT\nRYE\nSAD\nSAG\nSAP\nSAT\nSAW\nSAX\nSAY\nSEA\nSEE\nSET\n\
SEW\nSHE\nSHY\nSIN\nSIP\nSIR\nSIS\nSIT\nSIX\nSKI\nSKY\nSLY\nSOB\nSOD\nSON\n\
SOW\nSOY\nSPA\nSPY\nSTY\nSUB\nSUE\nSUM\nSUN\nTAB\nTAD\nTAG\nTAN\nTAP\nTAR\n\
TAX\nTEA\nTEE\nTEN\nTHE\nTIE\nTIN\nTIP\nTOE\nTON\nTOO\nTOP\nTOT\nTOW\nTOY\n\
TRY\nTUB\nTUG\nTWO\nURN\nUSE\nVAN\nVAT\nVET\nVIA\nVIE\nVOW\nWAD\nWAG\nWAR\n\
WAS\nWAX\nWAY\nWEB\nWED\nWET\nWHO\nWHY\nWIG\nWIN\nWIT\nWOE\nWON\nWOO\nWOW\n\
YAK\nYAM\nYAP\nYES\nYET\nYEW\nYOU\nZAP\nZED\nZEN\nZIP\nZOO\n\
AXES\nBEAT\nCATS\nDOTE\nEATS\nHAMS\nJEST\nNEST\nNOTE\nQUIZ\nRATE\nSEAT\n\
STAR\nTEAR\nTONE\nZEST\nNOTES\nSTONE\nONSET\nRATES\nSTARE\nTEARS\n\
RETAINS\nSTAINER\nNASTIER\nRETINAS\nVIVIFIC\n";

pub fn english_index() -> anagram::AnagramIndex {
    let alphabet = alphabet::make_english_alphabet();
    lexport::build_from_text(&alphabet, WORDS).unwrap()
}

pub fn temp_path(name: &str) -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("kanagram-{}-{}", std::process::id(), name));
    path.to_string_lossy().into_owned()
}
